//! Folio server wiring: configuration and the top-level router.
//!
//! The binary in `main.rs` reads a [`ServerConfig`], opens the SQLite store,
//! builds an [`HttpAuthorClient`] and serves [`app`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use folio_authors::AuthorServiceConfig;
use folio_core::{PublicationLifecycle, author::AuthorLookup, store::PublicationStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix for environment overrides, e.g. `FOLIO_PORT=9000` or
/// `FOLIO_AUTHORS__BASE_URL=http://authors:8080`.
pub const ENV_PREFIX: &str = "FOLIO";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Top-level settings, read from a TOML file and `FOLIO_*` environment
/// variables. Every key has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub authors:    AuthorServiceConfig,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8081 }

fn default_store_path() -> PathBuf { PathBuf::from("folio.db") }

impl ServerConfig {
  /// Read `path` (optional) and then the environment, later sources winning.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(environment()),
    )
  }

  pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// `FOLIO_` prefix, `__` between nested keys.
fn environment() -> Environment {
  Environment::with_prefix(ENV_PREFIX)
    .prefix_separator("_")
    .separator("__")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the publications API under `/api`, with request
/// tracing.
pub fn app<S, A>(lifecycle: Arc<PublicationLifecycle<S, A>>) -> Router
where
  S: PublicationStore + 'static,
  A: AuthorLookup + 'static,
{
  Router::new()
    .nest("/api", folio_api::api_router(lifecycle))
    .layer(TraceLayer::new_for_http())
}
