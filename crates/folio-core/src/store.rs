//! The `PublicationStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `folio-store-sqlite`).
//! The lifecycle service depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::publication::{NewPublication, Publication, PublicationStatus};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Which publications a page query returns. At most one criterion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationFilter {
  #[default]
  All,
  ByStatus(PublicationStatus),
  ByAuthor(i64),
}

/// A zero-based page request. `size` is clamped to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub size: u32,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 10;
  pub const MAX_PAGE_SIZE: u32 = 100;

  pub fn new(page: u32, size: u32) -> Self {
    Self {
      page,
      size: size.clamp(1, Self::MAX_PAGE_SIZE),
    }
  }

  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(0, Self::DEFAULT_SIZE) }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub page:        u32,
  pub size:        u32,
  pub total_items: u64,
  pub total_pages: u64,
}

impl<T> Page<T> {
  /// A zero `size` (only reachable through a struct literal) counts as 1.
  pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
    let size = request.size.max(1);
    Self {
      items,
      page: request.page,
      size,
      total_items,
      total_pages: total_items.div_ceil(u64::from(size)),
    }
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:       self.items.into_iter().map(f).collect(),
      page:        self.page,
      size:        self.size,
      total_items: self.total_items,
      total_pages: self.total_pages,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a publication store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PublicationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new publication. The store assigns the id, sets status to
  /// `DRAFT`, `review_count` and `version` to 0, and both timestamps to now.
  fn create_publication(
    &self,
    input: NewPublication,
  ) -> impl Future<Output = Result<Publication, Self::Error>> + Send + '_;

  /// Retrieve a publication by id. Returns `None` if not found.
  fn get_publication(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Publication>, Self::Error>> + Send + '_;

  /// Write back the lifecycle fields of `publication` (`status`,
  /// `review_count`, `updated_at`), provided the stored row still carries
  /// `publication.version`. On success the returned record has its version
  /// bumped by one.
  ///
  /// Returns `None` when no row matches both the id and the version, i.e. the
  /// publication is gone or another writer saved first.
  fn update_publication<'a>(
    &'a self,
    publication: &'a Publication,
  ) -> impl Future<Output = Result<Option<Publication>, Self::Error>> + Send + 'a;

  /// Return one page of publications matching `filter`, ordered by creation
  /// time then id.
  fn list_publications(
    &self,
    filter: PublicationFilter,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Publication>, Self::Error>> + Send + '_;
}
