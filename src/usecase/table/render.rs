use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use thiserror::Error;

use crate::domain::entities::table::{
    CellValue, ColumnDef, ColumnVisibility, GridBody, GridRow, HeaderCell, PageInfo, Pagination,
    SortDirection, SortKey, SortState, TableGrid,
};
use crate::usecase::table::paging::{clamp_page, total_pages};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),
}

type RowKeyFn<R> = Rc<dyn Fn(&R) -> Option<String>>;

/// Column layout for one table instance.
pub struct TableSpec<R> {
    columns: Vec<ColumnDef<R>>,
    row_key: Option<RowKeyFn<R>>,
    empty_message: String,
}

impl<R> TableSpec<R> {
    pub fn new(columns: Vec<ColumnDef<R>>) -> Result<Self, TableError> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(TableError::DuplicateColumnKey(column.key.clone()));
            }
        }

        Ok(Self {
            columns,
            row_key: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        })
    }

    /// Rows returning `Some(id)` are keyed by it instead of their position.
    pub fn with_row_key(mut self, row_key: impl Fn(&R) -> Option<String> + 'static) -> Self {
        self.row_key = Some(Rc::new(row_key));
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn render(&self, rows: &[R], sort: &SortState, visibility: &ColumnVisibility) -> TableGrid {
        let visible = visible_columns(&self.columns, visibility);
        let sorted = sort_rows(rows, &self.columns, sort);
        TableGrid {
            headers: header_cells(&visible, sort),
            body: self.body(&visible, &sorted),
            page: None,
        }
    }

    /// Sorts first, then slices the requested page. Out-of-range pages are clamped.
    pub fn render_page(
        &self,
        rows: &[R],
        sort: &SortState,
        visibility: &ColumnVisibility,
        pagination: Pagination,
    ) -> TableGrid {
        let visible = visible_columns(&self.columns, visibility);
        let sorted = sort_rows(rows, &self.columns, sort);

        let page_size = pagination.page_size.max(1);
        let pages = total_pages(rows.len(), page_size);
        let page = clamp_page(pagination.page, pages);
        let start = (page - 1) * page_size;
        let slice: Vec<(usize, &R)> = sorted.into_iter().skip(start).take(page_size).collect();

        TableGrid {
            headers: header_cells(&visible, sort),
            body: self.body(&visible, &slice),
            page: Some(PageInfo {
                page,
                page_size,
                total_rows: rows.len(),
                total_pages: pages,
            }),
        }
    }

    /// No rows, or no visible columns, collapse to one message row.
    fn body(&self, visible: &[&ColumnDef<R>], rows: &[(usize, &R)]) -> GridBody {
        if rows.is_empty() || visible.is_empty() {
            return GridBody::Empty {
                message: self.empty_message.clone(),
                colspan: visible.len().max(1),
            };
        }

        let rows = rows
            .iter()
            .map(|(original_idx, row)| GridRow {
                key: self
                    .row_key
                    .as_ref()
                    .and_then(|row_key| row_key(row))
                    .unwrap_or_else(|| format!("row-{original_idx}")),
                cells: visible.iter().map(|column| column.render_cell(row)).collect(),
            })
            .collect();
        GridBody::Rows(rows)
    }
}

fn header_cells<R>(visible: &[&ColumnDef<R>], sort: &SortState) -> Vec<HeaderCell> {
    visible
        .iter()
        .map(|column| HeaderCell {
            key: column.key.clone(),
            label: column.header.label(),
            sortable: column.sortable,
            sort: sort
                .iter()
                .position(|key| key.column_key == column.key)
                .map(|pos| (sort[pos].direction, pos + 1)),
        })
        .collect()
}

pub fn visible_columns<'a, R>(
    columns: &'a [ColumnDef<R>],
    visibility: &ColumnVisibility,
) -> Vec<&'a ColumnDef<R>> {
    columns
        .iter()
        .filter(|column| visibility.get(&column.key).copied().unwrap_or(true))
        .collect()
}

/// Fills in every known column (default visible) and drops keys for unknown columns.
pub fn normalize_visibility<R>(
    columns: &[ColumnDef<R>],
    visibility: &ColumnVisibility,
) -> ColumnVisibility {
    columns
        .iter()
        .map(|column| {
            let visible = visibility.get(&column.key).copied().unwrap_or(true);
            (column.key.clone(), visible)
        })
        .collect::<BTreeMap<_, _>>()
}

/// Numbers compare numerically, text by byte order, false before true.
/// Across types: empty < bool < number < text.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    fn rank(value: &CellValue) -> u8 {
        match value {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    match (a, b) {
        (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
        (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
        (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable multi-key sort. Returns rows paired with their original index.
pub fn sort_rows<'a, R>(
    rows: &'a [R],
    columns: &[ColumnDef<R>],
    sort: &SortState,
) -> Vec<(usize, &'a R)> {
    let mut indexed: Vec<(usize, &R)> = rows.iter().enumerate().collect();

    let criteria: Vec<(&ColumnDef<R>, SortDirection)> = sort
        .iter()
        .filter_map(|key| {
            columns
                .iter()
                .find(|column| column.key == key.column_key)
                .map(|column| (column, key.direction))
        })
        .collect();
    if criteria.is_empty() {
        return indexed;
    }

    indexed.sort_by(|(_, a), (_, b)| {
        for (column, direction) in &criteria {
            let ordering = compare_values(&column.value(a), &column.value(b));
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    indexed
}

/// Sort state after a header click: none -> asc -> desc -> none.
/// Without `additive` the clicked column replaces every other key.
pub fn next_sort_state(current: &SortState, column_key: &str, additive: bool) -> SortState {
    let existing = current
        .iter()
        .find(|key| key.column_key == column_key)
        .map(|key| key.direction);
    let next = match existing {
        None => Some(SortKey::asc(column_key)),
        Some(SortDirection::Asc) => Some(SortKey::desc(column_key)),
        Some(SortDirection::Desc) => None,
    };

    if !additive {
        return next.into_iter().collect();
    }

    let mut state = current.clone();
    match (state.iter().position(|key| key.column_key == column_key), next) {
        (Some(pos), Some(key)) => state[pos] = key,
        (Some(pos), None) => {
            state.remove(pos);
        }
        (None, Some(key)) => state.push(key),
        (None, None) => {}
    }
    state
}
