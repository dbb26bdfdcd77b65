use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::domain::entities::export::{CsvColumn, MissingField};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("row {row} has no value for column `{column}`")]
    MissingField { column: String, row: usize },
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not valid utf-8")]
    Encoding,
}

/// Serializes rows to CSV with every field quoted and inner quotes doubled.
pub struct CsvExporter<R> {
    columns: Vec<CsvColumn<R>>,
    missing: MissingField,
}

impl<R> CsvExporter<R> {
    pub fn new(columns: Vec<CsvColumn<R>>) -> Self {
        Self {
            columns,
            missing: MissingField::default(),
        }
    }

    pub fn with_missing(mut self, missing: MissingField) -> Self {
        self.missing = missing;
        self
    }

    pub fn to_csv_string(&self, rows: &[R]) -> Result<String, ExportError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.columns.iter().map(|column| column.header.as_str()))?;

        for (row_idx, row) in rows.iter().enumerate() {
            let mut record = Vec::with_capacity(self.columns.len());
            for column in &self.columns {
                let cell = match column.read(row) {
                    Some(value) => column.format(&value),
                    None => match &self.missing {
                        MissingField::Placeholder(text) => text.clone(),
                        MissingField::Reject => {
                            return Err(ExportError::MissingField {
                                column: column.key.clone(),
                                row: row_idx,
                            })
                        }
                    },
                };
                record.push(cell);
            }
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Csv(err.into_error().into()))?;
        String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::CellValue;

    struct Note {
        note: Option<&'static str>,
        score: f64,
    }

    fn note_column() -> CsvColumn<Note> {
        CsvColumn::new("note", "Note", |row: &Note| row.note.map(CellValue::from))
    }

    #[test]
    fn quotes_are_doubled_and_fields_wrapped() {
        let exporter = CsvExporter::new(vec![note_column()]);
        let rows = vec![Note {
            note: Some("He said \"hi\", ok"),
            score: 0.0,
        }];

        let text = exporter.to_csv_string(&rows).expect("export should succeed");

        assert_eq!(text, "\"Note\"\n\"He said \"\"hi\"\", ok\"\n");
    }

    #[test]
    fn header_only_when_no_rows() {
        let exporter = CsvExporter::new(vec![
            note_column(),
            CsvColumn::new("score", "Sc\"ore", |row: &Note| Some(CellValue::Number(row.score))),
        ]);

        let text = exporter.to_csv_string(&[]).expect("export should succeed");

        assert_eq!(text, "\"Note\",\"Sc\"\"ore\"\n");
    }

    #[test]
    fn formatter_runs_before_escaping() {
        let exporter = CsvExporter::new(vec![CsvColumn::new("score", "Score", |row: &Note| {
            Some(CellValue::Number(row.score))
        })
        .with_format(|value| format!("{value}\""))]);
        let rows = vec![Note {
            note: None,
            score: 92.0,
        }];

        let text = exporter.to_csv_string(&rows).expect("export should succeed");

        assert_eq!(text, "\"Score\"\n\"92\"\"\"\n");
    }

    #[test]
    fn missing_field_defaults_to_empty_cell() {
        let exporter = CsvExporter::new(vec![note_column()]);
        let rows = vec![Note {
            note: None,
            score: 1.0,
        }];

        let text = exporter.to_csv_string(&rows).expect("export should succeed");

        assert_eq!(text, "\"Note\"\n\"\"\n");
    }

    #[test]
    fn missing_field_placeholder_can_mimic_legacy_text() {
        let exporter = CsvExporter::new(vec![note_column()])
            .with_missing(MissingField::Placeholder("undefined".to_string()));
        let rows = vec![Note {
            note: None,
            score: 1.0,
        }];

        let text = exporter.to_csv_string(&rows).expect("export should succeed");

        assert_eq!(text, "\"Note\"\n\"undefined\"\n");
    }

    #[test]
    fn missing_field_reject_reports_column_and_row() {
        let exporter = CsvExporter::new(vec![note_column()]).with_missing(MissingField::Reject);
        let rows = vec![
            Note {
                note: Some("ok"),
                score: 1.0,
            },
            Note {
                note: None,
                score: 2.0,
            },
        ];

        let err = exporter
            .to_csv_string(&rows)
            .expect_err("missing field should fail");

        match err {
            ExportError::MissingField { column, row } => {
                assert_eq!(column, "note");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn embedded_newline_is_kept_inside_quotes() {
        let exporter = CsvExporter::new(vec![note_column()]);
        let rows = vec![Note {
            note: Some("line one\nline two"),
            score: 0.0,
        }];

        let text = exporter.to_csv_string(&rows).expect("export should succeed");

        assert_eq!(text, "\"Note\"\n\"line one\nline two\"\n");
    }
}
