//! [`PublicationLifecycle`] orchestrates creation, status changes and
//! enriched reads.
//!
//! Creation is fail-closed on author validation: if the author service cannot
//! confirm the author exists, nothing is persisted. Enriched reads are
//! fail-open: if the author projection cannot be fetched, the publication is
//! returned without it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  author::{Author, AuthorExistence, AuthorLookup},
  publication::{NewPublication, Publication, PublicationStatus, validate_new},
  store::{Page, PageRequest, PublicationFilter, PublicationStore},
  transition::apply_transition,
};

/// A publication together with its author's projection, if one could be
/// fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationWithAuthor {
  pub publication: Publication,
  pub author:      Option<Author>,
}

/// Resolve the list filters. The status filter wins over the author filter;
/// a blank status or a non-positive author id counts as absent.
pub fn resolve_filter(
  status: Option<&str>,
  author_id: Option<i64>,
) -> Result<PublicationFilter> {
  match (status.map(str::trim).filter(|s| !s.is_empty()), author_id) {
    (Some(token), _) => Ok(PublicationFilter::ByStatus(PublicationStatus::parse_token(token)?)),
    (None, Some(id)) if id > 0 => Ok(PublicationFilter::ByAuthor(id)),
    _ => Ok(PublicationFilter::All),
  }
}

/// The publication lifecycle service.
///
/// Holds no mutable state of its own; the store and the author lookup are the
/// only shared resources, so one instance can serve concurrent requests.
pub struct PublicationLifecycle<S, A> {
  store:   S,
  authors: A,
}

impl<S, A> PublicationLifecycle<S, A>
where
  S: PublicationStore,
  A: AuthorLookup,
{
  pub fn new(store: S, authors: A) -> Self { Self { store, authors } }

  pub fn store(&self) -> &S { &self.store }

  pub fn authors(&self) -> &A { &self.authors }

  /// Validate and persist a new publication in `DRAFT`.
  ///
  /// The author must be confirmed to exist by the author service before
  /// anything is written.
  pub async fn create(&self, input: NewPublication) -> Result<Publication> {
    info!(title = %input.title, "creating publication");

    let author_id = validate_new(&input).inspect_err(|e| {
      warn!(error = %e, "rejected publication input");
    })?;

    match self.authors.check_exists(author_id).await {
      AuthorExistence::Exists => {}
      AuthorExistence::DoesNotExist => {
        warn!(author_id, "author does not exist");
        return Err(Error::AuthorNotFound {
          author_id,
          lookup_failure: None,
        });
      }
      AuthorExistence::LookupFailed(reason) => {
        warn!(author_id, %reason, "could not verify author; refusing to create");
        return Err(Error::AuthorNotFound {
          author_id,
          lookup_failure: Some(reason),
        });
      }
    }

    let publication = self
      .store
      .create_publication(input)
      .await
      .map_err(Error::store)?;
    info!(id = %publication.publication_id, author_id, "publication created");
    Ok(publication)
  }

  /// Load a publication and attach its author's projection. A failed author
  /// fetch yields `author: None` rather than an error.
  pub async fn get_enriched(&self, id: Uuid) -> Result<PublicationWithAuthor> {
    info!(%id, "fetching enriched publication");
    let publication = self.load(id).await?;

    let author = self.authors.fetch_author(publication.author_id).await;
    if author.is_none() {
      warn!(
        %id,
        author_id = publication.author_id,
        "author projection unavailable; returning publication without it"
      );
    }

    Ok(PublicationWithAuthor { publication, author })
  }

  /// Move a publication to the status named by `requested`.
  pub async fn update_status(&self, id: Uuid, requested: &str) -> Result<Publication> {
    info!(%id, requested, "updating publication status");
    let mut publication = self.load(id).await?;

    let target = PublicationStatus::parse_token(requested).inspect_err(|_| {
      warn!(%id, requested, "unknown status");
    })?;

    let from = publication.status;
    apply_transition(&mut publication, target, Utc::now()).inspect_err(|_| {
      warn!(%id, %from, to = %target, "status transition not allowed");
    })?;

    let saved = self
      .store
      .update_publication(&publication)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        warn!(%id, version = publication.version, "stale publication version");
        Error::ConcurrentModification(id)
      })?;

    info!(%id, %from, to = %target, review_count = saved.review_count, "status updated");
    Ok(saved)
  }

  /// List publications, honouring at most one filter (status over author).
  pub async fn list(
    &self,
    page: PageRequest,
    status: Option<&str>,
    author_id: Option<i64>,
  ) -> Result<Page<Publication>> {
    let filter = resolve_filter(status, author_id)?;
    info!(page = page.page, size = page.size, ?filter, "listing publications");
    self
      .store
      .list_publications(filter, page)
      .await
      .map_err(Error::store)
  }

  async fn load(&self, id: Uuid) -> Result<Publication> {
    self
      .store
      .get_publication(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        warn!(%id, "publication not found");
        Error::PublicationNotFound(id)
      })
  }
}
