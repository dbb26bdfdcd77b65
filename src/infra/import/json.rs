use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::entities::record::Record;

/// Accepts a bare array of objects or an API envelope `{ "data": [...] }`.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text).context("failed to parse json")?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => anyhow::bail!("json object has no `data` array"),
        },
        _ => anyhow::bail!("json must be an array or an object with a `data` array"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            other => anyhow::bail!("item #{idx} is not an object: {other}"),
        })
        .collect()
}

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read json: {}", path.display()))?;
    parse_records(&text).with_context(|| format!("failed to load records: {}", path.display()))
}
