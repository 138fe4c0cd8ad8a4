//! Schema definitions: which fields an entity has and how each is encoded.
//!
//! A [`Schema`] is declared once per entity and registered in a
//! [`SchemaRegistry`] handed to the storage backend. Field-level defaults
//! (e.g. the email length cap) live here as explicit constants rather than
//! as runtime overrides of shared library behaviour.

use std::collections::BTreeMap;

use crate::store::Scope;

/// Default `max_length` for email fields (RFC 5321 path limit).
pub const EMAIL_MAX_LENGTH: u32 = 254;

// ─── FieldKind ───────────────────────────────────────────────────────────────

/// How a field converts between its logical and stored representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
  /// A structured document stored as canonical JSON text. Unparseable
  /// stored text is passed through unchanged on decode.
  Json,
  /// Plain text; user input is stripped of surrounding whitespace before
  /// validation.
  Trimmed,
  /// An email address; behaves like [`FieldKind::Trimmed`] with a default
  /// length cap of [`EMAIL_MAX_LENGTH`].
  Email,
  /// A US-numbering-plan phone number, stored as E.164 text with an `xN`
  /// extension suffix. Unparseable values are passed through unchanged in
  /// both directions.
  Phone,
  /// A two-letter ISO 3166-1 territory code from the fixed table.
  Country,
  /// The UUID of a record in another entity. Validated against the target
  /// entity under `scope` — `Scope::All` lets references to soft-deleted
  /// records remain valid.
  Reference { entity: String, scope: Scope },
}

// ─── FieldDef ────────────────────────────────────────────────────────────────

/// One field in an entity's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
  pub name:       String,
  pub kind:       FieldKind,
  pub required:   bool,
  pub max_length: Option<u32>,
}

impl FieldDef {
  pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
    let max_length = match kind {
      FieldKind::Email => Some(EMAIL_MAX_LENGTH),
      _ => None,
    };
    Self {
      name: name.into(),
      kind,
      required: false,
      max_length,
    }
  }

  pub fn json(name: impl Into<String>) -> Self {
    Self::new(name, FieldKind::Json)
  }

  pub fn trimmed(name: impl Into<String>) -> Self {
    Self::new(name, FieldKind::Trimmed)
  }

  pub fn email(name: impl Into<String>) -> Self {
    Self::new(name, FieldKind::Email)
  }

  pub fn phone(name: impl Into<String>) -> Self {
    Self::new(name, FieldKind::Phone)
  }

  pub fn country(name: impl Into<String>) -> Self {
    Self::new(name, FieldKind::Country)
  }

  /// A reference validated against the target entity's active records.
  pub fn reference(
    name: impl Into<String>,
    entity: impl Into<String>,
  ) -> Self {
    Self::new(name, FieldKind::Reference {
      entity: entity.into(),
      scope:  Scope::Active,
    })
  }

  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn with_max_length(mut self, max_length: u32) -> Self {
    self.max_length = Some(max_length);
    self
  }

  /// For reference fields: validate against all records, including
  /// soft-deleted ones.
  pub fn including_inactive(mut self) -> Self {
    if let FieldKind::Reference { ref mut scope, .. } = self.kind {
      *scope = Scope::All;
    }
    self
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// The full field list for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
  pub entity: String,
  pub fields: Vec<FieldDef>,
}

impl Schema {
  pub fn new(entity: impl Into<String>, fields: Vec<FieldDef>) -> Self {
    Self {
      entity: entity.into(),
      fields,
    }
  }

  pub fn field(&self, name: &str) -> Option<&FieldDef> {
    self.fields.iter().find(|f| f.name == name)
  }
}

// ─── SchemaRegistry ──────────────────────────────────────────────────────────

/// All schemas a storage backend knows about, keyed by entity name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
  schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
  pub fn new() -> Self { Self::default() }

  pub fn register(&mut self, schema: Schema) {
    self.schemas.insert(schema.entity.clone(), schema);
  }

  pub fn with(mut self, schema: Schema) -> Self {
    self.register(schema);
    self
  }

  pub fn get(&self, entity: &str) -> Option<&Schema> {
    self.schemas.get(entity)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_fields_default_to_254() {
    let def = FieldDef::email("contact_email");
    assert_eq!(def.max_length, Some(254));
  }

  #[test]
  fn email_max_length_can_be_overridden() {
    let def = FieldDef::email("contact_email").with_max_length(100);
    assert_eq!(def.max_length, Some(100));
  }

  #[test]
  fn reference_defaults_to_active_scope() {
    let def = FieldDef::reference("owner", "person");
    assert_eq!(def.kind, FieldKind::Reference {
      entity: "person".into(),
      scope:  Scope::Active,
    });

    let def = def.including_inactive();
    assert_eq!(def.kind, FieldKind::Reference {
      entity: "person".into(),
      scope:  Scope::All,
    });
  }

  #[test]
  fn registry_lookup() {
    let registry = SchemaRegistry::new()
      .with(Schema::new("person", vec![FieldDef::trimmed("name")]));
    assert!(registry.get("person").is_some());
    assert!(registry.get("order").is_none());
  }
}
