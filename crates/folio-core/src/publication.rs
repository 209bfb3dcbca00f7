//! Publication, the editorial record whose lifecycle this crate guards.
//!
//! A publication is a plain data holder. Legal status changes live in
//! [`crate::transition`]; creation-time rules live in [`validate_new`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Editorial status of a publication.
///
/// Parsing (`str::parse`) is ASCII case-insensitive; `Display` and serde always
/// produce the canonical uppercase name.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PublicationStatus {
  #[default]
  Draft,
  InReview,
  Approved,
  Published,
  Rejected,
}

impl PublicationStatus {
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a user-supplied status token, mapping failure to
  /// [`Error::InvalidStatus`]. Surrounding whitespace is ignored.
  pub fn parse_token(token: &str) -> Result<Self> {
    token
      .trim()
      .parse()
      .map_err(|_| Error::InvalidStatus(token.to_owned()))
  }
}

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The kind of work a publication represents. Each kind carries its own
/// creation rules (see [`validate_new`]).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationKind {
  #[default]
  LiteraryWork,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
  pub publication_id: Uuid,
  pub kind:           PublicationKind,
  pub title:          String,
  pub description:    Option<String>,
  pub content:        Option<String>,
  /// Id of an author owned by the external author service.
  pub author_id:      i64,
  pub status:         PublicationStatus,
  pub category:       Option<String>,
  /// Number of times the publication has entered `IN_REVIEW`.
  pub review_count:   u32,
  /// Optimistic-concurrency counter; bumped by the store on every update.
  pub version:        u64,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Publication {
  /// Whether every field needed for publishing is present and the publication
  /// has been approved. Informational only; transitions are not gated on it.
  pub fn is_ready_to_publish(&self) -> bool {
    self.status == PublicationStatus::Approved
      && !self.title.trim().is_empty()
      && self
        .content
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty())
  }
}

/// Input for creating a publication. The store assigns identity, status,
/// counters and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPublication {
  pub kind:        PublicationKind,
  pub title:       String,
  pub description: Option<String>,
  pub content:     Option<String>,
  pub author_id:   Option<i64>,
  pub category:    Option<String>,
}

impl NewPublication {
  /// Convenience constructor for a literary work with only the required
  /// fields set.
  pub fn new(title: impl Into<String>, author_id: i64) -> Self {
    Self {
      title: title.into(),
      author_id: Some(author_id),
      ..Self::default()
    }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check creation input against the rules of its kind and return the
/// validated author id.
pub fn validate_new(input: &NewPublication) -> Result<i64> {
  match input.kind {
    PublicationKind::LiteraryWork => {
      if input.title.trim().is_empty() {
        return Err(Error::InvalidPublication("title is required".into()));
      }
      match input.author_id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(Error::InvalidPublication(format!(
          "author id must be positive, got {id}"
        ))),
        None => Err(Error::InvalidPublication("author id is required".into())),
      }
    }
  }
}
