//! HTTP adapter for the external author service.
//!
//! [`HttpAuthorClient`] implements [`folio_core::author::AuthorLookup`] over
//! the author service's REST API:
//!
//! | Call | Request |
//! |------|---------|
//! | existence check | `GET {base_url}/api/authors/{id}/exists` → `{"exists": bool}` |
//! | projection fetch | `GET {base_url}/api/authors/{id}` → `{id, name, email?, country?}` |
//!
//! Each call is a single attempt bounded by the configured connect and read
//! timeouts.

mod client;
pub mod error;

pub use client::{AuthorServiceConfig, HttpAuthorClient};
pub use error::{Error, Result};
