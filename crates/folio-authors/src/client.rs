//! Async HTTP client for the author service.

use std::time::Duration;

use folio_core::author::{Author, AuthorExistence, AuthorLookup};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::{Error, Result};

/// Connection settings for the author service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorServiceConfig {
  #[serde(default = "default_base_url")]
  pub base_url:           String,
  #[serde(default = "default_connect_timeout_ms")]
  pub connect_timeout_ms: u64,
  #[serde(default = "default_read_timeout_ms")]
  pub read_timeout_ms:    u64,
}

fn default_base_url() -> String { "http://localhost:8080".into() }

fn default_connect_timeout_ms() -> u64 { 5_000 }

fn default_read_timeout_ms() -> u64 { 10_000 }

impl Default for AuthorServiceConfig {
  fn default() -> Self {
    Self {
      base_url:           default_base_url(),
      connect_timeout_ms: default_connect_timeout_ms(),
      read_timeout_ms:    default_read_timeout_ms(),
    }
  }
}

/// Body of `GET /api/authors/{id}/exists`. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct ExistsBody {
  exists: bool,
}

/// [`AuthorLookup`] over HTTP. No caching, no retries.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpAuthorClient {
  client:   Client,
  base_url: String,
}

impl HttpAuthorClient {
  pub fn new(config: &AuthorServiceConfig) -> Result<Self> {
    let client = Client::builder()
      .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
      .read_timeout(Duration::from_millis(config.read_timeout_ms))
      .build()
      .map_err(Error::Build)?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
    })
  }

  fn url(&self, path: &str) -> String { format!("{}/api{}", self.base_url, path) }

  /// `GET /api/authors/{id}/exists`
  async fn query_exists(&self, author_id: i64) -> Result<bool> {
    let url = self.url(&format!("/authors/{author_id}/exists"));
    debug!(%url, "checking author existence");

    let resp = self.client.get(&url).send().await.map_err(Error::send)?;
    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }
    let body: ExistsBody = resp.json().await.map_err(Error::Decode)?;
    Ok(body.exists)
  }

  /// `GET /api/authors/{id}`
  async fn query_author(&self, author_id: i64) -> Result<Author> {
    let url = self.url(&format!("/authors/{author_id}"));
    debug!(%url, "fetching author");

    let resp = self.client.get(&url).send().await.map_err(Error::send)?;
    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }
    resp.json().await.map_err(Error::Decode)
  }
}

impl AuthorLookup for HttpAuthorClient {
  async fn check_exists(&self, author_id: i64) -> AuthorExistence {
    if author_id <= 0 {
      warn!(author_id, "invalid author id; not querying author service");
      return AuthorExistence::DoesNotExist;
    }

    match self.query_exists(author_id).await {
      Ok(true) => {
        info!(author_id, "author exists");
        AuthorExistence::Exists
      }
      Ok(false) => {
        info!(author_id, "author does not exist");
        AuthorExistence::DoesNotExist
      }
      Err(e) => {
        error!(author_id, error = %e, "author existence check failed");
        AuthorExistence::LookupFailed(e.to_string())
      }
    }
  }

  async fn fetch_author(&self, author_id: i64) -> Option<Author> {
    if author_id <= 0 {
      warn!(author_id, "invalid author id; not fetching author");
      return None;
    }

    self
      .query_author(author_id)
      .await
      .inspect(|_| info!(author_id, "author data fetched"))
      .inspect_err(|e| warn!(author_id, error = %e, "author data unavailable"))
      .ok()
  }
}
