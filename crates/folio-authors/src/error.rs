//! Error type for `folio-authors`.
//!
//! These errors never cross the [`AuthorLookup`](folio_core::author::AuthorLookup)
//! seam: existence checks fold them into `LookupFailed`, projection fetches
//! into `None`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("author service did not answer in time")]
  Timeout(#[source] reqwest::Error),

  /// Refused connection, reset, or any other transport-level problem.
  #[error("request to author service failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("author service returned {0}")]
  Status(StatusCode),

  #[error("malformed response from author service: {0}")]
  Decode(#[source] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub(crate) fn send(e: reqwest::Error) -> Self {
    if e.is_timeout() { Self::Timeout(e) } else { Self::Transport(e) }
  }
}
