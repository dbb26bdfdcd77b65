use std::collections::BTreeSet;

use crate::domain::entities::export::CsvColumn;
use crate::domain::entities::record::Record;
use crate::domain::entities::table::{CellValue, ColumnDef};
use crate::usecase::export::csv_export::CsvExporter;
use crate::usecase::table::render::{TableError, TableSpec};

/// Union of record keys in first-seen order.
pub fn record_keys(records: &[Record]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut keys = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// `student_name` -> `Student Name`.
pub fn header_label(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn record_columns(keys: &[String]) -> Vec<ColumnDef<Record>> {
    keys.iter()
        .map(|key| {
            let field = key.clone();
            ColumnDef::new(key.clone(), header_label(key), move |record: &Record| {
                record.get(&field)
            })
            .with_cell(|value, _record| match value {
                CellValue::Bool(true) => "✓".to_string(),
                CellValue::Bool(false) => "✗".to_string(),
                other => other.display_text(),
            })
        })
        .collect()
}

pub fn record_table(keys: &[String]) -> Result<TableSpec<Record>, TableError> {
    Ok(TableSpec::new(record_columns(keys))?
        .with_row_key(Record::id)
        .with_empty_message("No data available"))
}

pub fn record_exporter(keys: &[String]) -> CsvExporter<Record> {
    let columns = keys
        .iter()
        .map(|key| {
            let field = key.clone();
            CsvColumn::new(key.clone(), header_label(key), move |record: &Record| {
                record.lookup(&field)
            })
        })
        .collect();
    CsvExporter::new(columns)
}
