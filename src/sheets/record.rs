// src/sheets/record.rs
// Submission values: the nested record as received and its flattened form.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::Number;

use super::error::SubmitError;

/// Nested submission as received from a client. Key order is preserved.
pub type Record = IndexMap<String, Value>;

/// Single-level view of a [`Record`] keyed by dotted path.
pub type FlatRecord = IndexMap<String, FlatValue>;

/// Any value a client may submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

/// Scalar leaf of a flattened record.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the scalar leaf for non-composite values.
    pub fn as_flat(&self) -> Option<FlatValue> {
        match self {
            Value::Null => Some(FlatValue::Null),
            Value::Bool(b) => Some(FlatValue::Bool(*b)),
            Value::Number(n) => Some(FlatValue::Number(n.clone())),
            Value::String(s) => Some(FlatValue::String(s.clone())),
            Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<FlatValue> for Value {
    fn from(value: FlatValue) -> Self {
        match value {
            FlatValue::Null => Value::Null,
            FlatValue::Bool(b) => Value::Bool(b),
            FlatValue::Number(n) => Value::Number(n),
            FlatValue::String(s) => Value::String(s),
        }
    }
}

impl FlatValue {
    /// Text written into a grid cell. `null` renders as an empty cell.
    pub fn to_cell_text(&self) -> String {
        match self {
            FlatValue::Null => String::new(),
            FlatValue::Bool(b) => b.to_string(),
            FlatValue::Number(n) => n.to_string(),
            FlatValue::String(s) => s.clone(),
        }
    }
}

/// Build a record from decoded form pairs. The first occurrence of a key wins.
pub fn record_from_pairs<I>(pairs: I) -> Record
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut record = Record::new();
    for (key, value) in pairs {
        record.entry(key).or_insert(Value::String(value));
    }
    record
}

/// Decode a JSON document that must be an object at the top level.
pub fn record_from_json(body: &[u8]) -> Result<Record, SubmitError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    match Value::from(value) {
        Value::Map(map) => Ok(map),
        other => Err(SubmitError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::List(_) => "an array",
        Value::Map(_) => "an object",
    }
}

/// Stamp the submission time under `field`, ISO-8601 UTC with milliseconds.
///
/// An existing value under `field` is replaced without moving the key.
pub fn stamp_submission_time(record: &mut Record, field: &str, at: DateTime<Utc>) {
    let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    record.insert(field.to_string(), Value::String(stamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_from_pairs_keeps_first_value() {
        let record = record_from_pairs(vec![
            ("name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
            ("name".to_string(), "Grace".to_string()),
        ]);
        assert_eq!(record.len(), 2);
        assert_eq!(record["name"], Value::from("Ada"));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "email"]);
    }

    #[test]
    fn test_record_from_json_preserves_key_order() {
        let record = record_from_json(br#"{"z": 1, "a": {"b": true}, "m": null}"#).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert!(matches!(record["a"], Value::Map(_)));
        assert_eq!(record["m"], Value::Null);
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        let err = record_from_json(b"[1, 2]").unwrap_err();
        assert!(matches!(err, SubmitError::MalformedPayload(_)));
        assert!(err.to_string().contains("an array"));

        let err = record_from_json(b"{not json").unwrap_err();
        assert!(matches!(err, SubmitError::Json(_)));
    }

    #[test]
    fn test_stamp_submission_time_format() {
        let mut record = record_from_pairs(vec![("a".to_string(), "1".to_string())]);
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        stamp_submission_time(&mut record, "date", at);
        assert_eq!(record["date"], Value::from("2024-03-09T14:05:07.000Z"));
        assert_eq!(record.keys().last().map(String::as_str), Some("date"));
    }

    #[test]
    fn test_stamp_submission_time_overwrites_in_place() {
        let mut record = record_from_pairs(vec![
            ("date".to_string(), "yesterday".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        stamp_submission_time(&mut record, "date", at);
        assert_eq!(record.get_index_of("date"), Some(0));
        assert_eq!(record["date"], Value::from("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_flat_value_cell_text() {
        assert_eq!(FlatValue::Null.to_cell_text(), "");
        assert_eq!(FlatValue::Bool(false).to_cell_text(), "false");
        assert_eq!(FlatValue::Number(Number::from(42)).to_cell_text(), "42");
        assert_eq!(
            FlatValue::Number(Number::from_f64(1.5).unwrap()).to_cell_text(),
            "1.5"
        );
        assert_eq!(FlatValue::String("x".into()).to_cell_text(), "x");
    }
}
