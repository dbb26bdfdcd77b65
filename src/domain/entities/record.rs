use serde_json::{Map, Value};

use crate::domain::entities::table::CellValue;

/// A loosely-typed row as handed over by the admin API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Missing keys and `null` both read as [`CellValue::Empty`].
    pub fn get(&self, key: &str) -> CellValue {
        self.fields
            .get(key)
            .map(value_to_cell)
            .unwrap_or(CellValue::Empty)
    }

    /// Like [`Record::get`] but tells a missing key apart from an empty value.
    pub fn lookup(&self, key: &str) -> Option<CellValue> {
        self.fields.get(key).map(value_to_cell)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn value_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(flag) => CellValue::Bool(*flag),
        Value::Number(number) => number
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(number.to_string())),
        Value::String(text) => CellValue::Text(text.clone()),
        nested => CellValue::Text(nested.to_string()),
    }
}
