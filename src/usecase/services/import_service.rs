use std::path::Path;

use anyhow::Result;

use crate::domain::entities::record::Record;
use crate::infra::import::json::load_records;

pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    pub fn import_json(&self, path: &Path) -> Result<Vec<Record>> {
        let records = load_records(path)?;
        tracing::info!(rows = records.len(), path = %path.display(), "imported records");
        Ok(records)
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
