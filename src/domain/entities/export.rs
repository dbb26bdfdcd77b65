use std::fmt;
use std::rc::Rc;

use crate::domain::entities::table::CellValue;

type FieldReader<R> = Rc<dyn Fn(&R) -> Option<CellValue>>;
type Formatter = Rc<dyn Fn(&CellValue) -> String>;

/// One CSV column: header text, the field it reads and an optional formatter.
pub struct CsvColumn<R> {
    pub key: String,
    pub header: String,
    reader: FieldReader<R>,
    formatter: Option<Formatter>,
}

impl<R> CsvColumn<R> {
    /// `reader` returns `None` when the row has no such field.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        reader: impl Fn(&R) -> Option<CellValue> + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            reader: Rc::new(reader),
            formatter: None,
        }
    }

    pub fn with_format(mut self, formatter: impl Fn(&CellValue) -> String + 'static) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    pub fn read(&self, row: &R) -> Option<CellValue> {
        (self.reader)(row)
    }

    pub fn format(&self, value: &CellValue) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value),
            None => value.display_text(),
        }
    }
}

impl<R> Clone for CsvColumn<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            reader: self.reader.clone(),
            formatter: self.formatter.clone(),
        }
    }
}

impl<R> fmt::Debug for CsvColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvColumn")
            .field("key", &self.key)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// What to write when a row has no value for a configured column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingField {
    Placeholder(String),
    Reject,
}

impl Default for MissingField {
    fn default() -> Self {
        MissingField::Placeholder(String::new())
    }
}
