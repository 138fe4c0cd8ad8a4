//! Records: entity instances with lifecycle metadata and a change snapshot.
//!
//! A record owns its field values plus a snapshot of those values taken at
//! the last successful save. Deletion is soft — `is_active` flips to false
//! and the row stays in storage, hidden from the default query scope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value::FieldValue;

/// One persisted (or to-be-persisted) entity instance.
#[derive(Debug, Clone)]
pub struct Record {
  entity:         String,
  id:             Option<Uuid>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
  pub is_active:  bool,
  values:         BTreeMap<String, FieldValue>,
  /// Field values as of the last successful save; `None` until then.
  snapshot:       Option<BTreeMap<String, FieldValue>>,
}

impl Record {
  /// A fresh, never-persisted record. Timestamps are unset until the first
  /// save stamps them.
  pub fn new(entity: impl Into<String>) -> Self {
    Self {
      entity:     entity.into(),
      id:         None,
      created_at: None,
      updated_at: None,
      is_active:  true,
      values:     BTreeMap::new(),
      snapshot:   None,
    }
  }

  /// Rebuild a record from its stored parts, as done by storage backends
  /// after a read. The snapshot is primed with the loaded values, so a
  /// freshly hydrated record reports no changes.
  #[allow(clippy::too_many_arguments)]
  pub fn hydrate(
    entity: impl Into<String>,
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
    values: BTreeMap<String, FieldValue>,
  ) -> Self {
    Self {
      entity: entity.into(),
      id: Some(id),
      created_at: Some(created_at),
      updated_at: Some(updated_at),
      is_active,
      snapshot: Some(values.clone()),
      values,
    }
  }

  pub fn entity(&self) -> &str { &self.entity }

  pub fn id(&self) -> Option<Uuid> { self.id }

  /// Whether the record has a persisted identity.
  pub fn is_persisted(&self) -> bool { self.id.is_some() }

  // ── Field access ──────────────────────────────────────────────────────────

  pub fn get(&self, field: &str) -> Option<&FieldValue> {
    self.values.get(field)
  }

  pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
    self.values.insert(field.into(), value.into());
  }

  pub fn unset(&mut self, field: &str) {
    self.values.remove(field);
  }

  pub fn values(&self) -> &BTreeMap<String, FieldValue> { &self.values }

  /// Replace a field's logical value in place without touching the
  /// snapshot. Used by backends that normalize values at the read boundary.
  pub fn replace_value(&mut self, field: &str, value: FieldValue) {
    if let Some(slot) = self.values.get_mut(field) {
      *slot = value;
    }
  }

  // ── Change tracking ───────────────────────────────────────────────────────

  /// Whether `field` differs from the value captured at the last successful
  /// save. Always false for records that have never been persisted.
  pub fn has_changed(&self, field: &str) -> bool {
    if !self.is_persisted() {
      return false;
    }
    match &self.snapshot {
      None => false,
      Some(snap) => snap.get(field) != self.values.get(field),
    }
  }

  // ── Lifecycle hooks (called by save machinery) ────────────────────────────

  /// Stamp timestamps for a save at `now`: `created_at` only on the very
  /// first save (no identity, no prior value), `updated_at` always.
  pub fn stamp(&mut self, now: DateTime<Utc>) {
    if !self.is_persisted() && self.created_at.is_none() {
      self.created_at = Some(now);
    }
    self.updated_at = Some(now);
  }

  /// Record a successful save: fix the identity and refresh the snapshot.
  pub fn mark_saved(&mut self, id: Uuid) {
    self.id = Some(id);
    self.snapshot = Some(self.values.clone());
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn at(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, secs).unwrap()
  }

  #[test]
  fn stamp_sets_created_once() {
    let mut r = Record::new("person");
    r.stamp(at(1));
    assert_eq!(r.created_at, Some(at(1)));
    assert_eq!(r.updated_at, Some(at(1)));

    r.mark_saved(Uuid::new_v4());
    r.stamp(at(2));
    assert_eq!(r.created_at, Some(at(1)), "created_at must not move");
    assert_eq!(r.updated_at, Some(at(2)));
  }

  #[test]
  fn stamp_respects_preassigned_created_at() {
    let mut r = Record::new("person");
    r.created_at = Some(at(0));
    r.stamp(at(5));
    assert_eq!(r.created_at, Some(at(0)));
    assert_eq!(r.updated_at, Some(at(5)));
  }

  #[test]
  fn has_changed_false_before_first_save() {
    let mut r = Record::new("person");
    r.set("name", "Alice");
    assert!(!r.has_changed("name"));
  }

  #[test]
  fn has_changed_tracks_mutation_since_snapshot() {
    let mut r = Record::new("person");
    r.set("name", "Alice");
    r.stamp(at(1));
    r.mark_saved(Uuid::new_v4());
    assert!(!r.has_changed("name"));

    r.set("name", "Alicia");
    assert!(r.has_changed("name"));

    // Setting it back to the snapshot value counts as unchanged.
    r.set("name", "Alice");
    assert!(!r.has_changed("name"));
  }

  #[test]
  fn has_changed_sees_newly_added_and_removed_fields() {
    let mut r = Record::new("person");
    r.set("name", "Alice");
    r.mark_saved(Uuid::new_v4());

    r.set("nickname", "Al");
    assert!(r.has_changed("nickname"));

    r.unset("name");
    assert!(r.has_changed("name"));
  }

  #[test]
  fn hydrated_record_reports_no_changes() {
    let mut values = BTreeMap::new();
    values.insert("name".to_string(), FieldValue::Text("Alice".into()));
    let r = Record::hydrate(
      "person",
      Uuid::new_v4(),
      at(1),
      at(2),
      true,
      values,
    );
    assert!(r.is_persisted());
    assert!(!r.has_changed("name"));
  }
}
