//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::{path::Path, sync::Arc};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use plinth_codec::SchemaValidator;
use plinth_core::{
  error::FieldError,
  lifecycle::{Validator, prepare_save},
  record::Record,
  schema::{FieldKind, Schema, SchemaRegistry},
  store::{RecordQuery, RecordStore, SaveOptions, Scope, UpsertOutcome},
  value::FieldValue,
};

use crate::{
  Error, Result,
  encode::{RawRecord, encode_dt, encode_record_fields, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Plinth record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and the
/// schema registry is shared.
#[derive(Clone)]
pub struct SqliteStore {
  conn:     tokio_rusqlite::Connection,
  registry: Arc<SchemaRegistry>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(
    path: impl AsRef<Path>,
    registry: SchemaRegistry,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self {
      conn,
      registry: Arc::new(registry),
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(registry: SchemaRegistry) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self {
      conn,
      registry: Arc::new(registry),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  fn schema_for(&self, entity: &str) -> Result<&Schema> {
    self
      .registry
      .get(entity)
      .ok_or_else(|| Error::UnknownEntity(entity.to_string()))
  }

  /// Whether a record of `entity` with `id` exists under `scope`.
  async fn reference_exists(
    &self,
    entity: String,
    id: Uuid,
    scope: Scope,
  ) -> Result<bool> {
    let id_str = encode_uuid(id);
    let active_only = scope == Scope::Active;

    let exists = self
      .conn
      .call(move |conn| {
        let sql = if active_only {
          "SELECT 1 FROM records
           WHERE record_id = ?1 AND entity = ?2 AND is_active = 1"
        } else {
          "SELECT 1 FROM records WHERE record_id = ?1 AND entity = ?2"
        };
        Ok(
          conn
            .query_row(sql, rusqlite::params![id_str, entity], |_| Ok(true))
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  /// Existence checks for every populated reference field. Malformed ids
  /// are left to the schema validator.
  async fn check_references(
    &self,
    schema: &Schema,
    record: &Record,
  ) -> Result<Vec<FieldError>> {
    let mut errors = Vec::new();

    for def in &schema.fields {
      let FieldKind::Reference { entity, scope } = &def.kind else {
        continue;
      };
      let Some(FieldValue::Text(raw)) = record.get(&def.name) else {
        continue;
      };
      let Ok(target) = Uuid::parse_str(raw) else { continue };

      if !self.reference_exists(entity.clone(), target, *scope).await? {
        errors.push(FieldError::new(
          &def.name,
          format!("no {entity} record with id {target}"),
        ));
      }
    }

    Ok(errors)
  }
}

// ─── Save-time validation ────────────────────────────────────────────────────

/// Schema checks plus the reference-existence errors gathered beforehand
/// (those need database access, which the validation seam doesn't have).
struct SaveValidator<'a> {
  schema:           &'a Schema,
  reference_errors: Vec<FieldError>,
}

impl Validator for SaveValidator<'_> {
  fn validate_all(&self, record: &Record) -> Vec<FieldError> {
    let mut errors = SchemaValidator::new(self.schema).validate_all(record);
    errors.extend(self.reference_errors.iter().cloned());
    errors
  }
}

// ─── Row loading ─────────────────────────────────────────────────────────────

fn load_fields(
  conn: &rusqlite::Connection,
  record_id: &str,
) -> rusqlite::Result<Vec<(String, Option<String>)>> {
  let mut stmt = conn
    .prepare("SELECT field, value FROM record_fields WHERE record_id = ?1")?;
  stmt
    .query_map(rusqlite::params![record_id], |row| {
      Ok((row.get(0)?, row.get(1)?))
    })?
    .collect()
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn save(
    &self,
    record: &mut Record,
    opts: SaveOptions,
  ) -> Result<Uuid> {
    let schema = self.schema_for(record.entity())?;

    let reference_errors = if opts.skip_validation {
      Vec::new()
    } else {
      self.check_references(schema, record).await?
    };
    let validator = SaveValidator {
      schema,
      reference_errors,
    };
    prepare_save(record, opts, &validator, Utc::now())?;

    let id = record.id().unwrap_or_else(Uuid::new_v4);
    let id_str = encode_uuid(id);
    let entity = record.entity().to_owned();
    let created_str =
      encode_dt(record.created_at.ok_or(Error::TimestampsUnset)?);
    let updated_str =
      encode_dt(record.updated_at.ok_or(Error::TimestampsUnset)?);
    let is_active = record.is_active;
    let fields = encode_record_fields(schema, record)?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO records (record_id, entity, created_at, updated_at, is_active)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(record_id) DO UPDATE SET
             created_at = excluded.created_at,
             updated_at = excluded.updated_at,
             is_active  = excluded.is_active",
          rusqlite::params![id_str, entity, created_str, updated_str, is_active],
        )?;
        tx.execute(
          "DELETE FROM record_fields WHERE record_id = ?1",
          rusqlite::params![id_str],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO record_fields (record_id, field, value)
             VALUES (?1, ?2, ?3)",
          )?;
          for (field, value) in &fields {
            stmt.execute(rusqlite::params![id_str, field, value])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    record.mark_saved(id);
    Ok(id)
  }

  async fn soft_delete(&self, record: &mut Record) -> Result<()> {
    record.is_active = false;
    self.save(record, SaveOptions::default()).await?;
    Ok(())
  }

  async fn get(&self, id: Uuid) -> Result<Option<Record>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        let head = conn
          .query_row(
            "SELECT record_id, entity, created_at, updated_at, is_active
             FROM records WHERE record_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawRecord {
                record_id:  row.get(0)?,
                entity:     row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
                is_active:  row.get(4)?,
                fields:     Vec::new(),
              })
            },
          )
          .optional()?;

        let Some(mut head) = head else { return Ok(None) };
        head.fields = load_fields(conn, &head.record_id)?;
        Ok(Some(head))
      })
      .await?;

    raw
      .map(|r| {
        let schema = self.registry.get(&r.entity);
        r.into_record(schema)
      })
      .transpose()
  }

  async fn query(&self, query: &RecordQuery) -> Result<Vec<Record>> {
    let entity = query.entity.clone();
    let active_only = query.scope == Scope::Active;
    let filters = query.field_equals.clone();
    // SQLite treats LIMIT -1 as unbounded.
    let limit_val = query.limit.map(|n| n as i64).unwrap_or(-1);
    let offset_val = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut sql = String::from(
          "SELECT r.record_id, r.entity, r.created_at, r.updated_at, r.is_active
           FROM records r
           WHERE r.entity = ?1",
        );
        let mut params: Vec<rusqlite::types::Value> = vec![entity.into()];

        if active_only {
          sql.push_str(" AND r.is_active = 1");
        }
        for (field, value) in filters {
          sql.push_str(&format!(
            " AND EXISTS (SELECT 1 FROM record_fields f
               WHERE f.record_id = r.record_id
                 AND f.field = ?{} AND f.value = ?{})",
            params.len() + 1,
            params.len() + 2,
          ));
          params.push(field.into());
          params.push(value.into());
        }
        sql.push_str(&format!(
          " ORDER BY r.created_at DESC LIMIT ?{} OFFSET ?{}",
          params.len() + 1,
          params.len() + 2,
        ));
        params.push(limit_val.into());
        params.push(offset_val.into());

        let mut stmt = conn.prepare(&sql)?;
        let mut raws = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawRecord {
              record_id:  row.get(0)?,
              entity:     row.get(1)?,
              created_at: row.get(2)?,
              updated_at: row.get(3)?,
              is_active:  row.get(4)?,
              fields:     Vec::new(),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        for raw in &mut raws {
          raw.fields = load_fields(conn, &raw.record_id)?;
        }
        Ok(raws)
      })
      .await?;

    raws
      .into_iter()
      .map(|r| {
        let schema = self.registry.get(&r.entity);
        r.into_record(schema)
      })
      .collect()
  }

  async fn create_or_update(
    &self,
    entity: &str,
    filter: &[(String, String)],
    attrs: &[(String, FieldValue)],
  ) -> Result<(UpsertOutcome, Record)> {
    let mut lookup = RecordQuery::entity(entity);
    lookup.field_equals = filter.to_vec();
    lookup.limit = Some(1);

    match self.query(&lookup).await?.into_iter().next() {
      Some(mut record) => {
        for (field, value) in attrs {
          record.set(field.clone(), value.clone());
        }
        if attrs.iter().any(|(field, _)| record.has_changed(field)) {
          self.save(&mut record, SaveOptions::default()).await?;
          Ok((UpsertOutcome::Updated, record))
        } else {
          Ok((UpsertOutcome::Unchanged, record))
        }
      }
      None => {
        let schema = self.schema_for(entity)?;
        let mut record = Record::new(entity);
        // Filter values arrive in stored form; decode to logical form so
        // the new record matches what a later query would return.
        for (field, value) in filter {
          let logical = match schema.field(field) {
            Some(def) => plinth_codec::decode_field(
              &def.kind,
              FieldValue::Text(value.clone()),
            ),
            None => FieldValue::Text(value.clone()),
          };
          record.set(field.clone(), logical);
        }
        for (field, value) in attrs {
          record.set(field.clone(), value.clone());
        }
        self.save(&mut record, SaveOptions::default()).await?;
        Ok((UpsertOutcome::Created, record))
      }
    }
  }
}
