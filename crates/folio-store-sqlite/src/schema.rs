//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS publications (
    publication_id TEXT PRIMARY KEY,
    kind           TEXT NOT NULL DEFAULT 'LITERARY_WORK',
    title          TEXT NOT NULL,
    description    TEXT,
    content        TEXT,
    author_id      INTEGER NOT NULL CHECK (author_id > 0),  -- owned by the author service
    status         TEXT NOT NULL DEFAULT 'DRAFT',
    category       TEXT,
    review_count   INTEGER NOT NULL DEFAULT 0 CHECK (review_count >= 0),
    version        INTEGER NOT NULL DEFAULT 0,              -- optimistic lock
    created_at     TEXT NOT NULL,   -- RFC 3339 UTC; immutable
    updated_at     TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS publications_status_idx  ON publications(status);
CREATE INDEX IF NOT EXISTS publications_author_idx  ON publications(author_id);
CREATE INDEX IF NOT EXISTS publications_created_idx ON publications(created_at, publication_id);

PRAGMA user_version = 1;
";
