//! folio-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `FOLIO_*`
//! environment overrides, opens the SQLite store and serves the publications
//! API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use folio_authors::HttpAuthorClient;
use folio_core::PublicationLifecycle;
use folio_server::{ServerConfig, expand_tilde};
use folio_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio publication service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config).context("failed to read configuration")?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let authors =
    HttpAuthorClient::new(&cfg.authors).context("failed to build author service client")?;
  tracing::info!(base_url = %cfg.authors.base_url, "using author service");

  let lifecycle = Arc::new(PublicationLifecycle::new(store, authors));
  let app = folio_server::app(lifecycle);

  let address = cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
