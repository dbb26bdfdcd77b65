use dioxus::prelude::*;

use crate::domain::entities::table::{GridBody, SortState, TableGrid};
use crate::ui::styles::{
    empty_cell_style, table_cell_style, table_container_style, table_header_cell_style,
};
use crate::usecase::table::render::next_sort_state;

fn sort_marker(grid: &TableGrid, idx: usize, multi: bool) -> String {
    match grid.headers.get(idx).and_then(|header| header.sort) {
        Some((direction, position)) if multi => format!(" {}{position}", direction.arrow()),
        Some((direction, _)) => format!(" {}", direction.arrow()),
        None => String::new(),
    }
}

/// Renders a prepared grid. Header clicks report the next sort state upward;
/// shift-click adds a secondary key.
#[component]
pub fn DataTable(
    grid: TableGrid,
    sort: SortState,
    on_sort_change: EventHandler<SortState>,
) -> Element {
    let multi = sort.len() > 1;
    let body = match &grid.body {
        GridBody::Empty { message, colspan } => rsx! {
            tr {
                td { colspan: "{colspan}", style: "{empty_cell_style()}", "{message}" }
            }
        },
        GridBody::Rows(rows) => rsx! {
            for row in rows.iter() {
                tr { key: "{row.key}",
                    for cell in row.cells.iter() {
                        td { style: "{table_cell_style()}", "{cell}" }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            style: "{table_container_style()}",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        {grid.headers.iter().enumerate().map(|(idx, header)| {
                            let key = header.key.clone();
                            let sortable = header.sortable;
                            let marker = sort_marker(&grid, idx, multi);
                            let sort = sort.clone();
                            rsx!(
                                th {
                                    key: "{header.key}",
                                    style: "{table_header_cell_style(sortable)}",
                                    onclick: move |event| {
                                        if !sortable {
                                            return;
                                        }
                                        let additive = event.modifiers().contains(Modifiers::SHIFT);
                                        on_sort_change.call(next_sort_state(&sort, &key, additive));
                                    },
                                    "{header.label}{marker}"
                                }
                            )
                        })}
                    }
                }
                tbody { {body} }
            }
        }
    }
}
