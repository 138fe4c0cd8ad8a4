//! Schema-driven dispatch over the field codecs, plus the record validator
//! and the form-input cleaning path.
//!
//! Storage backends use [`encode_field`] / [`decode_field`] at the
//! read/write boundary; [`SchemaValidator`] plugs into the core lifecycle's
//! `Validator` seam; [`clean_input`] is the strict path for raw user input.

use plinth_core::{
  error::FieldError,
  lifecycle::Validator,
  record::Record,
  schema::{FieldDef, FieldKind, Schema},
  value::FieldValue,
};
use uuid::Uuid;

use crate::{Result, country, json, phone, text};

// ─── Storage boundary ────────────────────────────────────────────────────────

/// Convert a stored value to its logical form, immediately after retrieval.
pub fn decode_field(kind: &FieldKind, value: FieldValue) -> FieldValue {
  match kind {
    FieldKind::Json => json::decode(value),
    FieldKind::Phone => match value {
      FieldValue::Text(t) => FieldValue::Text(phone::decode(&t)),
      other => other,
    },
    _ => value,
  }
}

/// Convert a logical value to its stored text form, just before the write.
/// `None` means the column is null.
pub fn encode_field(
  kind: &FieldKind,
  value: &FieldValue,
) -> Result<Option<String>> {
  match value {
    FieldValue::Null => Ok(None),
    // Already-serialized (or legacy unparseable) JSON text is stored as-is.
    FieldValue::Document(doc) => Ok(Some(json::encode(doc)?)),
    FieldValue::Text(t) => match kind {
      FieldKind::Phone => Ok(Some(phone::encode(t))),
      _ => Ok(Some(t.clone())),
    },
  }
}

// ─── Record validation ───────────────────────────────────────────────────────

/// The schema-driven validation collaborator. Collects every failing field
/// rather than stopping at the first.
///
/// JSON and phone fields are deliberately not strict-checked here: stored
/// legacy text that never parsed must remain re-saveable. Strictness lives
/// in [`clean_input`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'a> {
  schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
  pub fn new(schema: &'a Schema) -> Self { Self { schema } }
}

impl Validator for SchemaValidator<'_> {
  fn validate_all(&self, record: &Record) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let null = FieldValue::Null;

    for def in &self.schema.fields {
      let value = record.get(&def.name).unwrap_or(&null);

      if value.is_blank() {
        if def.required {
          errors.push(FieldError::new(&def.name, "this field is required"));
        }
        continue;
      }

      match &def.kind {
        FieldKind::Trimmed | FieldKind::Email => match value.as_text() {
          Some(t) => {
            if let Some(msg) = text::check_length(def, t) {
              errors.push(FieldError::new(&def.name, msg));
            }
          }
          None => {
            errors.push(FieldError::new(&def.name, "expected a text value"));
          }
        },
        FieldKind::Country => match value.as_text() {
          Some(t) if country::is_valid(t) => {}
          Some(t) => {
            errors.push(FieldError::new(
              &def.name,
              format!("{t:?} is not a valid country code"),
            ));
          }
          None => {
            errors.push(FieldError::new(&def.name, "expected a text value"));
          }
        },
        FieldKind::Reference { .. } => match value.as_text() {
          Some(t) if Uuid::parse_str(t).is_ok() => {}
          _ => {
            errors.push(FieldError::new(&def.name, "not a valid record id"));
          }
        },
        // Parse-or-passthrough kinds: nothing to enforce at save time.
        FieldKind::Json | FieldKind::Phone => {}
      }
    }

    // Values for fields the schema does not define are always an error.
    for name in record.values().keys() {
      if self.schema.field(name).is_none() {
        errors.push(FieldError::new(
          name,
          format!("not a field of entity {:?}", self.schema.entity),
        ));
      }
    }

    errors
  }
}

// ─── Form input ──────────────────────────────────────────────────────────────

/// Clean and validate one raw input string against a field definition,
/// producing the logical value to set on the record.
pub fn clean_input(def: &FieldDef, raw: &str) -> Result<FieldValue, FieldError> {
  let trimmed = raw.trim();

  if trimmed.is_empty() {
    return if def.required {
      Err(FieldError::new(&def.name, "this field is required"))
    } else {
      Ok(FieldValue::Null)
    };
  }

  match &def.kind {
    FieldKind::Json => json::validate(raw)
      .map(FieldValue::Document)
      .map_err(|e| FieldError::new(&def.name, e.to_string())),
    FieldKind::Trimmed | FieldKind::Email => {
      let cleaned = text::clean(raw);
      match text::check_length(def, &cleaned) {
        Some(msg) => Err(FieldError::new(&def.name, msg)),
        None => Ok(FieldValue::Text(cleaned)),
      }
    }
    FieldKind::Phone => Ok(FieldValue::Text(phone::decode(trimmed))),
    FieldKind::Country => country::validate(trimmed)
      .map(FieldValue::Text)
      .map_err(|e| FieldError::new(&def.name, e.to_string())),
    FieldKind::Reference { .. } => match Uuid::parse_str(trimmed) {
      Ok(id) => Ok(FieldValue::Text(id.hyphenated().to_string())),
      Err(_) => Err(FieldError::new(&def.name, "not a valid record id")),
    },
  }
}
