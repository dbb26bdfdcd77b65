use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A value read out of a row by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Default display text. Whole numbers drop the trailing `.0`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Text(value) => value.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Clone)]
pub enum Header {
    Text(String),
    Render(Rc<dyn Fn() -> String>),
}

impl Header {
    pub fn label(&self) -> String {
        match self {
            Header::Text(text) => text.clone(),
            Header::Render(render) => render(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Header::Render(_) => f.write_str("Render(..)"),
        }
    }
}

type Accessor<R> = Rc<dyn Fn(&R) -> CellValue>;
type CellRenderer<R> = Rc<dyn Fn(&CellValue, &R) -> String>;

/// One table column: a key, a header and an accessor into the row type.
pub struct ColumnDef<R> {
    pub key: String,
    pub header: Header,
    pub sortable: bool,
    accessor: Accessor<R>,
    cell: Option<CellRenderer<R>>,
}

impl<R> ColumnDef<R> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: Header::Text(header.into()),
            sortable: true,
            accessor: Rc::new(accessor),
            cell: None,
        }
    }

    pub fn with_header_render(mut self, render: impl Fn() -> String + 'static) -> Self {
        self.header = Header::Render(Rc::new(render));
        self
    }

    pub fn with_cell(mut self, render: impl Fn(&CellValue, &R) -> String + 'static) -> Self {
        self.cell = Some(Rc::new(render));
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None => value.display_text(),
        }
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ordered sort criteria. Empty keeps the original row order.
pub type SortState = Vec<SortKey>;

/// Column key to visible flag. A missing key means visible.
pub type ColumnVisibility = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Applied direction and its 1-based position in the sort state.
    pub sort: Option<(SortDirection, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridBody {
    Rows(Vec<GridRow>),
    Empty { message: String, colspan: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub headers: Vec<HeaderCell>,
    pub body: GridBody,
    pub page: Option<PageInfo>,
}
