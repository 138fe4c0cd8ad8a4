//! The logical value model for record fields.
//!
//! A field's stored form is always text; its logical form is a
//! [`FieldValue`]. Structured fields carry a [`Document`] — a JSON-shaped
//! tree extended with the decimal and date/time leaf types the storage text
//! cannot represent natively.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};

// ─── FieldValue ──────────────────────────────────────────────────────────────

/// The in-memory value of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  Null,
  Text(String),
  Document(Document),
}

impl FieldValue {
  pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

  /// The text content, if this value is text.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(t) => Some(t),
      _ => None,
    }
  }

  pub fn as_document(&self) -> Option<&Document> {
    match self {
      Self::Document(d) => Some(d),
      _ => None,
    }
  }

  /// True for `Null` and for empty or whitespace-only text; the "blank"
  /// test used by required-field validation.
  pub fn is_blank(&self) -> bool {
    match self {
      Self::Null => true,
      Self::Text(t) => t.trim().is_empty(),
      Self::Document(_) => false,
    }
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Document> for FieldValue {
  fn from(d: Document) -> Self { Self::Document(d) }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A structured document value, as held in memory by a JSON-backed field.
///
/// The tree is a superset of JSON: `Decimal`, `Date` and `DateTime` leaves
/// exist in memory but are rendered as strings by the canonical encoder, so
/// they come back as [`Document::Text`] after a storage round-trip. That
/// narrowing is deliberate and documented on the JSON codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  Decimal(Decimal),
  Date(NaiveDate),
  DateTime(NaiveDateTime),
  Text(String),
  Array(Vec<Document>),
  Object(BTreeMap<String, Document>),
}

impl Document {
  /// Convenience constructor for object documents.
  pub fn object<K, V, I>(entries: I) -> Self
  where
    K: Into<String>,
    V: Into<Document>,
    I: IntoIterator<Item = (K, V)>,
  {
    Self::Object(
      entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    )
  }
}

impl From<&str> for Document {
  fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for Document {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<i64> for Document {
  fn from(i: i64) -> Self { Self::Integer(i) }
}

impl From<bool> for Document {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<Decimal> for Document {
  fn from(d: Decimal) -> Self { Self::Decimal(d) }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
  fn from(items: Vec<T>) -> Self {
    Self::Array(items.into_iter().map(Into::into).collect())
  }
}

// ─── Canonical serialization ─────────────────────────────────────────────────

/// The canonical storage encoding: plain JSON, with decimal and date/time
/// leaves rendered as strings (`"1.50"`, `"2024-06-01"`,
/// `"2024-06-01 12:30:00"`). Object keys serialize in sorted order, so the
/// output is deterministic.
impl Serialize for Document {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Null => s.serialize_unit(),
      Self::Bool(b) => s.serialize_bool(*b),
      Self::Integer(i) => s.serialize_i64(*i),
      Self::Float(f) => s.serialize_f64(*f),
      Self::Decimal(d) => s.serialize_str(&d.to_string()),
      Self::Date(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
      Self::DateTime(dt) => {
        s.serialize_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string())
      }
      Self::Text(t) => s.serialize_str(t),
      Self::Array(items) => {
        let mut seq = s.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Self::Object(map) => {
        let mut obj = s.serialize_map(Some(map.len()))?;
        for (k, v) in map {
          obj.serialize_entry(k, v)?;
        }
        obj.end()
      }
    }
  }
}
