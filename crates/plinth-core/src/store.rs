//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `plinth-store-sqlite`). Application code depends on this abstraction,
//! not on any concrete backend. Concurrent saves of the same record are not
//! coordinated here — last writer wins unless the backend says otherwise.

use std::future::Future;

use uuid::Uuid;

use crate::record::Record;

// ─── Save options ────────────────────────────────────────────────────────────

/// Per-save behaviour switches. The defaults validate fully and stamp
/// timestamps.
#[derive(Debug, Clone, Copy)]
pub struct SaveOptions {
  /// Skip field validation entirely. Storage constraints still apply.
  pub skip_validation:   bool,
  /// Stamp `created_at` (first save only) and `updated_at`. Opting out
  /// leaves both fields exactly as the caller set them.
  pub update_timestamps: bool,
}

impl Default for SaveOptions {
  fn default() -> Self {
    Self {
      skip_validation:   false,
      update_timestamps: true,
    }
  }
}

// ─── Query scope ─────────────────────────────────────────────────────────────

/// Which records a query sees. The default lens hides soft-deleted rows;
/// `All` is the administrative escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
  /// Only records with `is_active == true`.
  #[default]
  Active,
  /// Every record, soft-deleted ones included.
  All,
}

// ─── RecordQuery ─────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::query`]. Field filters compare against the
/// stored (encoded) form of each value.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
  pub entity:       String,
  pub scope:        Scope,
  /// `(field, stored value)` equality conditions, all of which must hold.
  pub field_equals: Vec<(String, String)>,
  pub limit:        Option<usize>,
  pub offset:       Option<usize>,
}

impl RecordQuery {
  pub fn entity(entity: impl Into<String>) -> Self {
    Self {
      entity: entity.into(),
      ..Self::default()
    }
  }

  pub fn with_scope(mut self, scope: Scope) -> Self {
    self.scope = scope;
    self
  }

  pub fn with_field(
    mut self,
    field: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.field_equals.push((field.into(), value.into()));
    self
  }
}

// ─── Upsert outcome ──────────────────────────────────────────────────────────

/// What [`RecordStore::create_or_update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
  /// A matching record existed and no attribute differed; nothing written.
  Unchanged,
  /// A matching record existed and at least one attribute changed.
  Updated,
  /// No match; a new record was created.
  Created,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Plinth storage backend.
///
/// `save` owns the full lifecycle: validation, timestamp stamping, the
/// single delegated persistence call, and the snapshot refresh. Validation
/// failures abort before anything is written; storage failures propagate
/// unchanged.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `record`, assigning an identity on first save. On success the
  /// record's snapshot is refreshed and its id returned.
  fn save<'a>(
    &'a self,
    record: &'a mut Record,
    opts: SaveOptions,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + 'a;

  /// Mark `record` inactive and save it with default options. The row stays
  /// in storage but disappears from `Scope::Active` queries.
  fn soft_delete<'a>(
    &'a self,
    record: &'a mut Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Fetch one record by identity, decoded to logical values, regardless of
  /// scope. Returns `None` if no such row exists.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Fetch records matching `query`, newest first.
  fn query<'a>(
    &'a self,
    query: &'a RecordQuery,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Find the first active record matching `filter`, apply `attrs`, and
  /// save only if something actually changed; create the record when no
  /// match exists. Filter values are in stored form.
  fn create_or_update<'a>(
    &'a self,
    entity: &'a str,
    filter: &'a [(String, String)],
    attrs: &'a [(String, crate::value::FieldValue)],
  ) -> impl Future<Output = Result<(UpsertOutcome, Record), Self::Error>>
  + Send
  + 'a;
}
