//! Encoding and decoding helpers between logical records and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Field values go through the codec layer: encoded to
//! stored form on the way in, decoded to logical form on the way out, so
//! callers only ever see logical values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use plinth_core::{
  record::Record,
  schema::{FieldKind, Schema},
  value::FieldValue,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Field values ────────────────────────────────────────────────────────────

/// Encode every field of `record` to its stored text form. Fields the schema
/// does not define (possible under `skip_validation`) are stored verbatim.
pub fn encode_record_fields(
  schema: &Schema,
  record: &Record,
) -> Result<Vec<(String, Option<String>)>> {
  record
    .values()
    .iter()
    .map(|(name, value)| {
      let kind = schema
        .field(name)
        .map(|def| &def.kind)
        .unwrap_or(&FieldKind::Trimmed);
      let stored = plinth_codec::encode_field(kind, value)?;
      Ok((name.clone(), stored))
    })
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `records` row plus its `record_fields`.
pub struct RawRecord {
  pub record_id:  String,
  pub entity:     String,
  pub created_at: String,
  pub updated_at: String,
  pub is_active:  bool,
  /// `(field, stored value)` pairs; a `None` value is a null column.
  pub fields:     Vec<(String, Option<String>)>,
}

impl RawRecord {
  /// Decode into a hydrated [`Record`] with logical field values. A missing
  /// schema decodes every field as plain text.
  pub fn into_record(self, schema: Option<&Schema>) -> Result<Record> {
    let id = decode_uuid(&self.record_id)?;
    let created_at = decode_dt(&self.created_at)?;
    let updated_at = decode_dt(&self.updated_at)?;

    let mut values = BTreeMap::new();
    for (name, stored) in self.fields {
      let raw = match stored {
        Some(text) => FieldValue::Text(text),
        None => FieldValue::Null,
      };
      let logical = match schema.and_then(|s| s.field(&name)) {
        Some(def) => plinth_codec::decode_field(&def.kind, raw),
        None => raw,
      };
      values.insert(name, logical);
    }

    Ok(Record::hydrate(
      self.entity,
      id,
      created_at,
      updated_at,
      self.is_active,
      values,
    ))
  }
}

#[cfg(test)]
mod tests {
  use plinth_core::{
    schema::FieldDef,
    value::Document,
  };

  use super::*;

  fn person_schema() -> Schema {
    Schema::new("person", vec![
      FieldDef::trimmed("name"),
      FieldDef::phone("phone"),
      FieldDef::json("prefs"),
    ])
  }

  #[test]
  fn dt_round_trip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn bad_dt_is_a_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn fields_encode_to_stored_form() {
    let schema = person_schema();
    let mut r = Record::new("person");
    r.set("name", "Alice");
    r.set("phone", "+1 555-123-4567");
    r.set("prefs", Document::object([("theme", "dark")]));

    let stored = encode_record_fields(&schema, &r).unwrap();
    assert_eq!(stored, vec![
      ("name".to_string(), Some("Alice".to_string())),
      ("phone".to_string(), Some("+15551234567".to_string())),
      ("prefs".to_string(), Some(r#"{"theme":"dark"}"#.to_string())),
    ]);
  }

  #[test]
  fn raw_record_decodes_to_logical_values() {
    let schema = person_schema();
    let raw = RawRecord {
      record_id:  encode_uuid(Uuid::new_v4()),
      entity:     "person".to_string(),
      created_at: encode_dt(Utc::now()),
      updated_at: encode_dt(Utc::now()),
      is_active:  true,
      fields:     vec![
        ("phone".to_string(), Some("+15551234567".to_string())),
        ("prefs".to_string(), Some(r#"{"theme":"dark"}"#.to_string())),
        ("legacy".to_string(), None),
      ],
    };

    let record = raw.into_record(Some(&schema)).unwrap();
    assert_eq!(
      record.get("phone"),
      Some(&FieldValue::Text("+1 555-123-4567".into()))
    );
    assert_eq!(
      record.get("prefs"),
      Some(&FieldValue::Document(Document::object([("theme", "dark")])))
    );
    assert_eq!(record.get("legacy"), Some(&FieldValue::Null));
    assert!(!record.has_changed("phone"));
  }
}
