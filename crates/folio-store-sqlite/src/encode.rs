//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order equals chronological order.
//! UUIDs are stored as hyphenated lowercase strings; enums by their canonical
//! uppercase name.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use folio_core::publication::{Publication, PublicationKind, PublicationStatus};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Truncate to the precision the store keeps, so values handed back to
/// callers compare equal to what a later read returns.
pub fn store_precision(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ────────────────────────────────────────────────────────────────────

pub fn encode_status(s: PublicationStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<PublicationStatus> {
  s.parse().map_err(|_| Error::Decode {
    column: "status",
    value:  s.to_owned(),
  })
}

pub fn encode_kind(k: PublicationKind) -> &'static str { k.into() }

pub fn decode_kind(s: &str) -> Result<PublicationKind> {
  s.parse().map_err(|_| Error::Decode {
    column: "kind",
    value:  s.to_owned(),
  })
}

// ─── Integers ─────────────────────────────────────────────────────────────────

pub fn encode_version(v: u64) -> Result<i64> {
  i64::try_from(v).map_err(|_| Error::Decode {
    column: "version",
    value:  v.to_string(),
  })
}

fn decode_unsigned<T: TryFrom<i64>>(column: &'static str, v: i64) -> Result<T> {
  T::try_from(v).map_err(|_| Error::Decode {
    column,
    value: v.to_string(),
  })
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column order shared by every `SELECT` that produces a [`RawPublication`].
pub const PUBLICATION_COLUMNS: &str = "publication_id, kind, title, description, content, \
   author_id, status, category, review_count, version, created_at, updated_at";

/// A `publications` row exactly as SQLite returns it.
pub struct RawPublication {
  pub publication_id: String,
  pub kind:           String,
  pub title:          String,
  pub description:    Option<String>,
  pub content:        Option<String>,
  pub author_id:      i64,
  pub status:         String,
  pub category:       Option<String>,
  pub review_count:   i64,
  pub version:        i64,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawPublication {
  /// Read a row selected with [`PUBLICATION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      publication_id: row.get(0)?,
      kind:           row.get(1)?,
      title:          row.get(2)?,
      description:    row.get(3)?,
      content:        row.get(4)?,
      author_id:      row.get(5)?,
      status:         row.get(6)?,
      category:       row.get(7)?,
      review_count:   row.get(8)?,
      version:        row.get(9)?,
      created_at:     row.get(10)?,
      updated_at:     row.get(11)?,
    })
  }

  pub fn into_publication(self) -> Result<Publication> {
    Ok(Publication {
      publication_id: decode_uuid(&self.publication_id)?,
      kind:           decode_kind(&self.kind)?,
      title:          self.title,
      description:    self.description,
      content:        self.content,
      author_id:      self.author_id,
      status:         decode_status(&self.status)?,
      category:       self.category,
      review_count:   decode_unsigned("review_count", self.review_count)?,
      version:        decode_unsigned("version", self.version)?,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
