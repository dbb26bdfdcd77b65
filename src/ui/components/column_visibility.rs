use dioxus::prelude::*;

use crate::domain::entities::table::ColumnVisibility;

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnOption {
    pub key: String,
    pub label: String,
}

#[component]
pub fn ColumnVisibilityDropdown(
    label: &'static str,
    columns: Vec<ColumnOption>,
    visibility: ColumnVisibility,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    let mut open = use_signal(|| false);
    let mut anchor = use_signal(|| (0.0_f64, 0.0_f64));
    let (left, top) = anchor();
    let hidden_count = columns
        .iter()
        .filter(|column| !visibility.get(&column.key).copied().unwrap_or(true))
        .count();

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open() {
                        open.set(false);
                        return;
                    }
                    let point = event.client_coordinates();
                    anchor.set((point.x, point.y + 24.0));
                    open.set(true);
                },
                if hidden_count > 0 { "Columns ({hidden_count} hidden)" } else { "Columns" }
            }
        }

        if open() {
            div {
                style: "position: fixed; inset: 0; z-index: 1100;",
                onclick: move |_| open.set(false),
            }
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                onclick: move |event| event.stop_propagation(),
                {columns.iter().map(|column| {
                    let checked = visibility.get(&column.key).copied().unwrap_or(true);
                    let key = column.key.clone();
                    let label = column.label.clone();
                    rsx!(
                        label {
                            key: "{column.key}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| {
                                    on_toggle.call((key.clone(), !checked));
                                }
                            }
                            span { "{label}" }
                        }
                    )
                })}
            }
        }
    }
}
