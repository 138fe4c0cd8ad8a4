//! Error types for the plinth-codec crate.
//!
//! Only the strict, form-input validation paths raise; the storage decode
//! paths use passthrough instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Raw user input for a JSON field was not parseable. Carries the
  /// underlying parser message.
  #[error("JSON decode error: {0}")]
  JsonDecode(String),

  #[error("unknown country code: {0:?}")]
  UnknownCountry(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
