//! Error types for `folio-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::publication::PublicationStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid publication: {0}")]
  InvalidPublication(String),

  #[error("invalid status: {0:?}")]
  InvalidStatus(String),

  #[error("cannot change status from {from} to {to}")]
  InvalidTransition {
    from: PublicationStatus,
    to:   PublicationStatus,
  },

  /// The author is confirmed absent, or its existence could not be verified.
  /// `lookup_failure` carries the transport reason in the latter case.
  #[error("author {author_id} not found{}", lookup_suffix(.lookup_failure))]
  AuthorNotFound {
    author_id:      i64,
    lookup_failure: Option<String>,
  },

  #[error("publication not found: {0}")]
  PublicationNotFound(Uuid),

  #[error("publication {0} was modified concurrently")]
  ConcurrentModification(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn lookup_suffix(reason: &Option<String>) -> String {
  reason
    .as_deref()
    .map(|r| format!(" (could not verify author: {r})"))
    .unwrap_or_default()
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
