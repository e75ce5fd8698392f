//! Row and streaming types for query results.

use crate::error::AppError;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::pin::Pin;

/// Parameters for Cypher queries.
///
/// A map of parameter names to JSON values that can be passed to queries.
pub type Params = HashMap<String, JsonValue>;

/// A stream of rows from a query result.
///
/// Rows are fetched on-demand, not loaded all at once.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single row from a query result.
///
/// Contains column values as JSON, with typed extraction via [`Row::get`]
/// and whole-row decoding via [`Row::decode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    data: HashMap<String, JsonValue>,
}

impl Row {
    /// Creates a new row from a map of column names to values.
    pub fn new(data: HashMap<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Gets a value from the row by column name, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or if deserialization fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Internal(format!("column not found: {}", key)))
            .and_then(|v| {
                serde_json::from_value(v.clone()).map_err(|e| {
                    AppError::Internal(format!("failed to deserialize '{}': {}", key, e))
                })
            })
    }

    /// Gets a value from the row, returning `None` if the key doesn't exist or is null.
    ///
    /// Still returns an error if the key exists but deserialization fails.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    /// Decodes the whole row into a typed record whose fields are the column aliases.
    ///
    /// Null columns are dropped first so `#[serde(default)]` fields fill in.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let object: serde_json::Map<String, JsonValue> = self
            .data
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::from_value(JsonValue::Object(object))
            .map_err(|e| AppError::Internal(format!("failed to decode row: {}", e)))
    }
}

impl From<HashMap<String, JsonValue>> for Row {
    fn from(data: HashMap<String, JsonValue>) -> Self {
        Self::new(data)
    }
}

/// Builds a row from a `serde_json::json!` object. Non-objects give an empty row.
impl From<JsonValue> for Row {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self::new(map.into_iter().collect()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_row_get_string() {
        let row = Row::from(json!({"name": "Maria Andersson"}));
        let name: String = row.get("name").unwrap();
        assert_eq!(name, "Maria Andersson");
    }

    #[test]
    fn test_row_get_missing_key() {
        let row = Row::new(HashMap::new());
        let result: Result<String, _> = row.get("missing");
        assert!(result.is_err());
    }

    #[test]
    fn test_row_get_opt_null() {
        let row = Row::from(json!({"orcid_id": null}));
        let orcid: Option<String> = row.get_opt("orcid_id").unwrap();
        assert_eq!(orcid, None);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        roles: Vec<String>,
        #[serde(default)]
        year: Option<i64>,
    }

    #[test]
    fn test_row_decode_fills_defaults_for_null_columns() {
        let row = Row::from(json!({"name": "Anders", "roles": null, "year": 2022}));
        let sample: Sample = row.decode().unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "Anders".to_string(),
                roles: vec![],
                year: Some(2022),
            }
        );
    }

    #[test]
    fn test_row_decode_reports_missing_required_column() {
        let row = Row::from(json!({"roles": ["SUPERVISOR"]}));
        let result: Result<Sample, _> = row.decode();
        assert!(result.is_err());
    }
}
