use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data row, keyed by a stable row key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    pub key: String,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl RowData {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Map::new(),
        }
    }

    /// Builder-style setter for a single column value.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Display text for a column. Missing values and nulls render empty.
    pub fn text(&self, column: &str) -> String {
        match self.values.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
