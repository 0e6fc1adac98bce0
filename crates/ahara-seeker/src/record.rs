//! Schemaless records: an id plus a bag of named fields.
//!
//! Records deserialize from flat JSON objects, so a food item looks like
//!
//! ```json
//! {"id": "f-001", "name": "Basmati Rice", "calories": 130, "tags": ["grain"]}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{format_number, Value};

/// Owned field value stored on a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Free text.
    Text(String),
    /// List of strings (tags, conditions, allergies).
    List(Vec<String>),
}

impl FieldValue {
    /// Borrows this field as a comparison [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(*n),
            FieldValue::Text(s) => Value::String(s),
            FieldValue::List(items) => Value::List(items),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(String::from).collect())
    }
}

/// A food item, patient or any other collection entry.
///
/// The engine never mutates records; they are supplied wholesale by the
/// caller before each evaluation. Fields set to `null` in JSON are dropped
/// on load and read as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    /// Unique identifier within the collection.
    pub id: String,
    /// Every other field, keyed by name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Deserialize)]
struct RawRecord {
    id: String,
    #[serde(flatten)]
    fields: BTreeMap<String, Option<FieldValue>>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            id: raw.id,
            fields: raw
                .fields
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value)))
                .collect(),
        }
    }
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Returns a field by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Renders a field for display; absent fields render as an empty string.
    pub fn display(&self, field: &str) -> String {
        if field == "id" {
            return self.id.clone();
        }
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }
}

impl Seekable for Record {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        if field == "id" {
            return Value::String(&self.id);
        }
        self.fields
            .get(field)
            .map(FieldValue::as_value)
            .unwrap_or(Value::None)
    }
}
