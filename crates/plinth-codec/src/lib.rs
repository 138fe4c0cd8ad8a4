//! Field codecs for Plinth: conversion between logical field values and
//! their stored text form, plus schema-driven validation.
//!
//! Pure and synchronous; no database or async dependencies. Storage backends
//! call [`encode_field`] on write and [`decode_field`] on read, and form
//! layers call [`clean_input`] on raw user input.
//!
//! Decode failures for JSON and phone fields are deliberately non-fatal:
//! legacy or partially-invalid stored data must stay displayable and
//! re-saveable, so those paths pass the raw value through unchanged instead
//! of raising. Each swallowed failure is counted (see [`passthrough`]) and
//! logged at warn level, so dirty data is visible without being blocking.

pub mod country;
pub mod error;
pub mod field;
pub mod json;
pub mod phone;
pub mod text;

pub use error::{Error, Result};
pub use field::{SchemaValidator, clean_input, decode_field, encode_field};

/// Bookkeeping for swallowed decode/encode failures.
pub mod passthrough {
  use std::sync::atomic::{AtomicU64, Ordering};

  static COUNT: AtomicU64 = AtomicU64::new(0);

  /// Total number of values passed through unchanged because they could
  /// not be parsed, since process start.
  pub fn count() -> u64 { COUNT.load(Ordering::Relaxed) }

  pub(crate) fn note(kind: &'static str, raw: &str) {
    COUNT.fetch_add(1, Ordering::Relaxed);
    tracing::warn!(
      field_kind = kind,
      value = raw,
      "unparseable value passed through unchanged"
    );
  }
}
