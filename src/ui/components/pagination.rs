use dioxus::prelude::*;

use crate::usecase::table::paging::PageControl;

const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 2px 10px; border-radius: 6px; cursor: pointer;";

/// Owns the current page; requests outside `[1, total_pages]` never reach `on_page_change`.
/// Starts on page 1, so callers key it by row count to reset it when data changes.
#[component]
pub fn Pagination(total_pages: usize, on_page_change: EventHandler<usize>) -> Element {
    let mut control = use_signal(|| PageControl::new(total_pages));

    let state = control();
    let current = state.current();
    let pages = state.total_pages();

    rsx! {
        div {
            style: "display: flex; gap: 8px; align-items: center;",
            button {
                style: BUTTON_STYLE,
                disabled: !state.can_previous(),
                onclick: move |_| {
                    let page = control.write().first();
                    on_page_change.call(page);
                },
                "«"
            }
            button {
                style: BUTTON_STYLE,
                disabled: !state.can_previous(),
                onclick: move |_| {
                    if let Some(page) = control.write().previous() {
                        on_page_change.call(page);
                    }
                },
                "‹"
            }
            span { "Page {current} / {pages}" }
            button {
                style: BUTTON_STYLE,
                disabled: !state.can_next(),
                onclick: move |_| {
                    if let Some(page) = control.write().next() {
                        on_page_change.call(page);
                    }
                },
                "›"
            }
            button {
                style: BUTTON_STYLE,
                disabled: !state.can_next(),
                onclick: move |_| {
                    let page = control.write().last();
                    on_page_change.call(page);
                },
                "»"
            }
        }
    }
}
