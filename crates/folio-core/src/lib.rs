//! Core types and trait definitions for the Folio publication service.
//!
//! This crate has no HTTP or database dependencies. It owns
//! the status state machine, the author-lookup contract, the store contract,
//! and the lifecycle service that ties them together.

pub mod author;
pub mod error;
pub mod lifecycle;
pub mod publication;
pub mod store;
pub mod transition;

pub use error::{Error, Result};
pub use lifecycle::{PublicationLifecycle, PublicationWithAuthor};
