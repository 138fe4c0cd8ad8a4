//! The JSON document codec.
//!
//! Encoding goes through [`Document`]'s canonical `Serialize` impl, which
//! renders decimal and date/time leaves as strings. Decoding parses stored
//! text back into a [`Document`]; text that does not parse is passed
//! through unchanged so legacy rows stay readable. Only [`validate`] — the
//! form-input path — treats a parse failure as an error.

use std::collections::BTreeMap;

use plinth_core::value::{Document, FieldValue};

use crate::{
  Error, Result,
  passthrough,
};

/// Serialize a document to its canonical stored text.
pub fn encode(doc: &Document) -> Result<String> {
  Ok(serde_json::to_string(doc)?)
}

/// Decode a stored value into its logical form.
///
/// Text is parsed as JSON; on failure the text comes back unchanged.
/// Non-text values are returned as-is, so the function is idempotent under
/// repeated decode.
pub fn decode(value: FieldValue) -> FieldValue {
  match value {
    FieldValue::Text(raw) => match serde_json::from_str(&raw) {
      Ok(parsed) => FieldValue::Document(from_json(parsed)),
      Err(_) => {
        passthrough::note("json", &raw);
        FieldValue::Text(raw)
      }
    },
    other => other,
  }
}

/// Strictly parse raw user input, surfacing the parser's message on
/// failure.
pub fn validate(raw: &str) -> Result<Document> {
  let parsed: serde_json::Value = serde_json::from_str(raw)
    .map_err(|e| Error::JsonDecode(e.to_string()))?;
  Ok(from_json(parsed))
}

/// Map a parsed JSON tree onto the logical document model. Strings stay
/// strings — decimals and dates that were stringified on encode are not
/// guessed back.
fn from_json(value: serde_json::Value) -> Document {
  match value {
    serde_json::Value::Null => Document::Null,
    serde_json::Value::Bool(b) => Document::Bool(b),
    serde_json::Value::Number(n) => match n.as_i64() {
      Some(i) => Document::Integer(i),
      None => Document::Float(n.as_f64().unwrap_or(f64::NAN)),
    },
    serde_json::Value::String(s) => Document::Text(s),
    serde_json::Value::Array(items) => {
      Document::Array(items.into_iter().map(from_json).collect())
    }
    serde_json::Value::Object(map) => Document::Object(
      map
        .into_iter()
        .map(|(k, v)| (k, from_json(v)))
        .collect::<BTreeMap<_, _>>(),
    ),
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use rust_decimal::Decimal;

  use super::*;

  #[test]
  fn round_trip_plain_json() {
    let doc = Document::object([
      ("name", Document::Text("Alice".into())),
      ("age", Document::Integer(41)),
      ("tags", Document::from(vec!["a", "b"])),
      ("active", Document::Bool(true)),
      ("nothing", Document::Null),
    ]);
    let stored = encode(&doc).unwrap();
    let decoded = decode(FieldValue::Text(stored));
    assert_eq!(decoded, FieldValue::Document(doc));
  }

  #[test]
  fn decimal_and_datetime_leaves_come_back_as_text() {
    let doc = Document::object([
      ("price", Document::Decimal(Decimal::new(150, 2))),
      (
        "day",
        Document::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
      ),
    ]);
    let stored = encode(&doc).unwrap();
    let decoded = decode(FieldValue::Text(stored));

    let expected = Document::object([
      ("price", Document::Text("1.50".into())),
      ("day", Document::Text("2024-06-01".into())),
    ]);
    assert_eq!(decoded, FieldValue::Document(expected));
  }

  #[test]
  fn corrupt_text_passes_through_unchanged() {
    let before = crate::passthrough::count();
    let decoded = decode(FieldValue::Text("{not json".into()));
    assert_eq!(decoded, FieldValue::Text("{not json".into()));
    assert!(crate::passthrough::count() > before);
  }

  #[test]
  fn decode_is_idempotent_on_documents() {
    let doc = FieldValue::Document(Document::Integer(7));
    assert_eq!(decode(doc.clone()), doc);
  }

  #[test]
  fn validate_surfaces_the_parser_message() {
    let err = validate("{oops").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("JSON decode error:"), "got: {msg}");
  }

  #[test]
  fn validate_accepts_scalars() {
    assert_eq!(validate("42").unwrap(), Document::Integer(42));
    assert_eq!(validate("\"x\"").unwrap(), Document::Text("x".into()));
  }
}
