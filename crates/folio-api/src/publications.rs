//! Handlers for `/publications` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/publications` | Optional `page`, `size`, `status`, `authorId`; status wins over author |
//! | `POST`  | `/publications` | Body: [`CreateBody`]; returns 201 + stored publication |
//! | `GET`   | `/publications/:id` | Publication enriched with its author (`author: null` if unavailable) |
//! | `PATCH` | `/publications/:id/status` | Body: `{"status":"IN_REVIEW"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use folio_core::{
  PublicationLifecycle, author::AuthorLookup, publication::NewPublication,
  store::{PageRequest, PublicationStore},
};
use uuid::Uuid;

use crate::{
  dto::{CreateBody, EnrichedResponse, ListParams, PageResponse, PublicationResponse, StatusBody},
  error::ApiError,
};

type Lifecycle<S, A> = Arc<PublicationLifecycle<S, A>>;

fn publication_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
  path
    .map(|Path(id)| id)
    .map_err(|e| ApiError::BadRequest(e.body_text()))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /publications[?page=0][&size=10][&status=...][&authorId=...]`
pub async fn list<S, A>(
  State(lifecycle): State<Lifecycle<S, A>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError>
where
  S: PublicationStore,
  A: AuthorLookup,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let page = PageRequest::new(
    params.page.unwrap_or(0),
    params.size.unwrap_or(PageRequest::DEFAULT_SIZE),
  );

  let page = lifecycle
    .list(page, params.status.as_deref(), params.author_id)
    .await?;
  Ok(Json(page.into()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /publications`: 201 with the stored publication.
pub async fn create<S, A>(
  State(lifecycle): State<Lifecycle<S, A>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PublicationStore,
  A: AuthorLookup,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let publication = lifecycle.create(NewPublication::from(body)).await?;
  Ok((StatusCode::CREATED, Json(PublicationResponse::from(publication))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /publications/:id`
pub async fn get_one<S, A>(
  State(lifecycle): State<Lifecycle<S, A>>,
  path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EnrichedResponse>, ApiError>
where
  S: PublicationStore,
  A: AuthorLookup,
{
  let id = publication_id(path)?;
  let enriched = lifecycle.get_enriched(id).await?;
  Ok(Json(enriched.into()))
}

// ─── Status ───────────────────────────────────────────────────────────────────

/// `PATCH /publications/:id/status`, body `{"status":"APPROVED"}`
pub async fn update_status<S, A>(
  State(lifecycle): State<Lifecycle<S, A>>,
  path: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<PublicationResponse>, ApiError>
where
  S: PublicationStore,
  A: AuthorLookup,
{
  let id = publication_id(path)?;
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let publication = lifecycle.update_status(id, &body.status).await?;
  Ok(Json(publication.into()))
}
