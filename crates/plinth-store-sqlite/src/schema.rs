//! SQL schema for the Plinth SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Rows are never hard-deleted; soft deletion flips is_active to 0.
CREATE TABLE IF NOT EXISTS records (
    record_id   TEXT PRIMARY KEY,
    entity      TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; set once on first save
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC; refreshed on every save
    is_active   INTEGER NOT NULL DEFAULT 1
);

-- One row per field value, in stored (encoded) text form.
CREATE TABLE IF NOT EXISTS record_fields (
    record_id TEXT NOT NULL REFERENCES records(record_id) ON DELETE CASCADE,
    field     TEXT NOT NULL,
    value     TEXT,
    PRIMARY KEY (record_id, field)
);

CREATE INDEX IF NOT EXISTS records_entity_idx ON records(entity, is_active);
CREATE INDEX IF NOT EXISTS records_created_idx ON records(created_at);
CREATE INDEX IF NOT EXISTS record_fields_value_idx ON record_fields(field, value);

PRAGMA user_version = 1;
";
