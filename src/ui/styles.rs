pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; gap: 8px; padding: 8px; box-sizing: border-box; font-family: sans-serif;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style(sortable: bool) -> String {
    let cursor = if sortable { "pointer" } else { "default" };
    format!(
        "position: sticky; top: 0; z-index: 2; background: #f4f6f8; border: 1px solid #bbb; padding: 6px; text-align: left; white-space: nowrap; user-select: none; cursor: {cursor};"
    )
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px;"
}

pub fn empty_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 16px; text-align: center; color: #777;"
}

pub fn banner_style(is_error: bool) -> &'static str {
    if is_error {
        "padding: 6px 10px; border-radius: 6px; background: #fdecea; color: #a12;"
    } else {
        "padding: 6px 10px; border-radius: 6px; background: #eef4ff; color: #234;"
    }
}
