//! Error types for `plinth-core`.

use thiserror::Error;

/// A single failed field check: the field name and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field:   field.into(),
      message: message.into(),
    }
  }
}

/// All field checks that failed for one record, collected exhaustively so a
/// caller can present the full correction list in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_errors(.errors))]
pub struct ValidationError {
  pub errors: Vec<FieldError>,
}

impl ValidationError {
  pub fn new(errors: Vec<FieldError>) -> Self { Self { errors } }

  /// The names of all offending fields, in reporting order.
  pub fn fields(&self) -> Vec<&str> {
    self.errors.iter().map(|e| e.field.as_str()).collect()
  }
}

fn join_errors(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(FieldError::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("no schema registered for entity {0:?}")]
  UnknownEntity(String),

  #[error("record has no field {0:?} in its schema")]
  UnknownField(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_error_lists_every_field() {
    let err = ValidationError::new(vec![
      FieldError::new("phone", "too short"),
      FieldError::new("country", "unknown code"),
    ]);
    assert_eq!(err.fields(), ["phone", "country"]);
    let rendered = err.to_string();
    assert!(rendered.contains("phone: too short"));
    assert!(rendered.contains("country: unknown code"));
  }
}
