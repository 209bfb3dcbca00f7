//! Wire shapes for the publications API. Field names are camelCase.

use chrono::{DateTime, Utc};
use folio_core::{
  PublicationWithAuthor,
  author::Author,
  publication::{NewPublication, Publication, PublicationKind, PublicationStatus},
  store::Page,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Requests ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /publications`.
///
/// A missing title decodes as blank so it is reported as an invalid
/// publication rather than a malformed body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  #[serde(default)]
  pub title:       String,
  pub description: Option<String>,
  pub content:     Option<String>,
  pub author_id:   Option<i64>,
  pub category:    Option<String>,
}

impl From<CreateBody> for NewPublication {
  fn from(b: CreateBody) -> Self {
    NewPublication {
      kind:        PublicationKind::LiteraryWork,
      title:       b.title,
      description: b.description,
      content:     b.content,
      author_id:   b.author_id,
      category:    b.category,
    }
  }
}

/// JSON body accepted by `PATCH /publications/:id/status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
  #[serde(default)]
  pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub page:      Option<u32>,
  pub size:      Option<u32>,
  pub status:    Option<String>,
  pub author_id: Option<i64>,
}

// ─── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationResponse {
  pub id:               Uuid,
  pub title:            String,
  pub description:      Option<String>,
  pub content:          Option<String>,
  pub author_id:        i64,
  pub status:           PublicationStatus,
  pub category:         Option<String>,
  pub publication_type: PublicationKind,
  pub review_count:     u32,
  pub version:          u64,
  pub ready_to_publish: bool,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

impl From<Publication> for PublicationResponse {
  fn from(p: Publication) -> Self {
    Self {
      ready_to_publish: p.is_ready_to_publish(),
      id:               p.publication_id,
      title:            p.title,
      description:      p.description,
      content:          p.content,
      author_id:        p.author_id,
      status:           p.status,
      category:         p.category,
      publication_type: p.kind,
      review_count:     p.review_count,
      version:          p.version,
      created_at:       p.created_at,
      updated_at:       p.updated_at,
    }
  }
}

/// A publication plus its author. `author` is `null` when the author service
/// could not provide it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedResponse {
  #[serde(flatten)]
  pub publication: PublicationResponse,
  pub author:      Option<Author>,
}

impl From<PublicationWithAuthor> for EnrichedResponse {
  fn from(e: PublicationWithAuthor) -> Self {
    Self {
      publication: e.publication.into(),
      author:      e.author,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
  pub content:        Vec<PublicationResponse>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl From<Page<Publication>> for PageResponse {
  fn from(p: Page<Publication>) -> Self {
    let p = p.map(PublicationResponse::from);
    Self {
      content:        p.items,
      page:           p.page,
      size:           p.size,
      total_elements: p.total_items,
      total_pages:    p.total_pages,
    }
  }
}
