//! Error type for `plinth-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record failed field validation; nothing was written.
  #[error(transparent)]
  Validation(#[from] plinth_core::ValidationError),

  #[error("codec error: {0}")]
  Codec(#[from] plinth_codec::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The record's entity has no schema in the registry.
  #[error("unknown entity: {0:?}")]
  UnknownEntity(String),

  /// A save with `update_timestamps: false` reached the write with a
  /// timestamp still unset.
  #[error("cannot persist a record with unset timestamps")]
  TimestampsUnset,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
