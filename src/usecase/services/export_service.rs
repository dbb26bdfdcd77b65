use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::infra::export::csv::{csv_file_path, write_csv_file};
use crate::usecase::export::csv_export::CsvExporter;

pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Writes `<filename>.csv` into the export dir and returns its path.
    pub fn export_to_csv<R>(
        &self,
        rows: &[R],
        exporter: &CsvExporter<R>,
        filename: &str,
    ) -> Result<PathBuf> {
        let path = csv_file_path(&self.export_dir, filename);
        self.export_to_path(rows, exporter, &path)?;
        Ok(path)
    }

    pub fn export_to_path<R>(&self, rows: &[R], exporter: &CsvExporter<R>, path: &Path) -> Result<()> {
        let text = exporter
            .to_csv_string(rows)
            .context("failed to serialize csv")?;
        write_csv_file(path, &text)?;
        tracing::info!(rows = rows.len(), path = %path.display(), "exported csv");
        Ok(())
    }
}
