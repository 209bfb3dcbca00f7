//! Authors are owned by a separate service. This crate only consumes a
//! read-only projection of them through [`AuthorLookup`].

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

/// Read-only projection of an author, fetched at response time and never
/// persisted. The author service may leave `email` and `country` null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub id:      i64,
  pub name:    String,
  #[serde(default)]
  pub email:   Option<String>,
  #[serde(default)]
  pub country: Option<String>,
}

/// Outcome of asking the author service whether an author exists.
///
/// `LookupFailed` means the question could not be answered. It must never be
/// read as `DoesNotExist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorExistence {
  Exists,
  DoesNotExist,
  LookupFailed(String),
}

impl fmt::Display for AuthorExistence {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Exists => f.write_str("exists"),
      Self::DoesNotExist => f.write_str("does not exist"),
      Self::LookupFailed(reason) => write!(f, "lookup failed: {reason}"),
    }
  }
}

/// Adapter over the remote author service.
///
/// Implementations make at most one remote call per method and never retry.
/// Non-positive ids are answered locally without a remote call.
pub trait AuthorLookup: Send + Sync {
  /// Ask whether `author_id` exists. Transport failures surface as
  /// [`AuthorExistence::LookupFailed`].
  fn check_exists(
    &self,
    author_id: i64,
  ) -> impl Future<Output = AuthorExistence> + Send + '_;

  /// Fetch the author projection. Any failure degrades to `None`.
  fn fetch_author(
    &self,
    author_id: i64,
  ) -> impl Future<Output = Option<Author>> + Send + '_;
}
