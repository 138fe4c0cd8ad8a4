//! Pure save-time lifecycle logic, shared by every storage backend.
//!
//! Backends call [`prepare_save`] before their single persistence write and
//! [`Record::mark_saved`] after it; everything in between is the backend's
//! own concern.

use chrono::{DateTime, Utc};

use crate::{
  error::{FieldError, ValidationError},
  record::Record,
  store::SaveOptions,
};

/// The validation collaborator: produces the complete list of failed field
/// checks for a record. An empty list means the record is valid.
pub trait Validator {
  fn validate_all(&self, record: &Record) -> Vec<FieldError>;
}

/// A validator that accepts everything. Useful for tests and for callers
/// that validate elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
  fn validate_all(&self, _record: &Record) -> Vec<FieldError> { Vec::new() }
}

/// Run the pre-persistence half of a save: exhaustive validation (unless
/// skipped) followed by timestamp stamping (unless opted out).
///
/// On a validation failure the record is left untouched — timestamps are
/// only stamped once validation has passed, so a failed save is fully
/// abortive.
pub fn prepare_save(
  record: &mut Record,
  opts: SaveOptions,
  validator: &dyn Validator,
  now: DateTime<Utc>,
) -> Result<(), ValidationError> {
  if !opts.skip_validation {
    let errors = validator.validate_all(record);
    if !errors.is_empty() {
      return Err(ValidationError::new(errors));
    }
  }

  if opts.update_timestamps {
    record.stamp(now);
  }

  Ok(())
}
