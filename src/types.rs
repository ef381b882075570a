//! Core data model types for decoded ledger records.
//!
//! Decoding produces a [`RecordSet`] of insertion-ordered [`Record`]s whose
//! cells are typed [`Value`]s. Field order inside a record always matches the
//! declaration order of the non-ignored columns in the
//! [`crate::schema::Schema`] that produced it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single typed cell value in a [`Record`].
///
/// This is the closed set of value shapes a formatter may produce: missing,
/// numeric, or textual. It serializes untagged, so a record becomes a flat
/// JSON object (`null` / number / string cells).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Numeric value (64-bit float).
    Number(f64),
    /// UTF-8 string value.
    Text(String),
}

impl Value {
    /// Returns the inner string if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the inner number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// One decoded line: an insertion-ordered mapping from field name to [`Value`].
///
/// Records are immutable values once decoding produces them; the only field
/// added later is the parent key, and [`crate::hierarchy::attach_parents`]
/// does that by building a new record set rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, preserving insertion order for new names.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns `true` if the record carries a field with this name.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of decoded [`Record`]s, one per accepted input line.
///
/// All records in a set share one field set (they were decoded against a
/// single schema), in original line order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    /// Records in original line order.
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create a record set from decoded records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records in the set.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the set has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Returns `true` if the records in this set carry the named field.
    ///
    /// Records share one field set, so inspecting the first is sufficient.
    /// An empty set reports `false`.
    pub fn has_field(&self, name: &str) -> bool {
        self.records
            .first()
            .is_some_and(|r| r.contains_field(name))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
