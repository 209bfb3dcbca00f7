//! JSON REST API for Folio.
//!
//! Exposes an axum [`Router`] backed by a [`PublicationLifecycle`] over any
//! [`PublicationStore`] and [`AuthorLookup`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(lifecycle.clone()))
//! ```

pub mod dto;
pub mod error;
pub mod publications;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use folio_core::{PublicationLifecycle, author::AuthorLookup, store::PublicationStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `lifecycle`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, A>(lifecycle: Arc<PublicationLifecycle<S, A>>) -> Router<()>
where
  S: PublicationStore + 'static,
  A: AuthorLookup + 'static,
{
  Router::new()
    .route(
      "/publications",
      get(publications::list::<S, A>).post(publications::create::<S, A>),
    )
    .route("/publications/{id}", get(publications::get_one::<S, A>))
    .route(
      "/publications/{id}/status",
      patch(publications::update_status::<S, A>),
    )
    .with_state(lifecycle)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use folio_core::author::{Author, AuthorExistence};
  use folio_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  /// Author service double: answers existence with `existence` and serves
  /// `author` for projection fetches.
  #[derive(Clone)]
  struct StubAuthors {
    existence: AuthorExistence,
    author:    Option<Author>,
  }

  impl AuthorLookup for StubAuthors {
    async fn check_exists(&self, _author_id: i64) -> AuthorExistence { self.existence.clone() }

    async fn fetch_author(&self, _author_id: i64) -> Option<Author> { self.author.clone() }
  }

  fn jane() -> Author {
    Author {
      id:      42,
      name:    "Jane Doe".into(),
      email:   Some("jane@example.com".into()),
      country: Some("Chile".into()),
    }
  }

  async fn app_with(existence: AuthorExistence, author: Option<Author>) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let lifecycle = PublicationLifecycle::new(store, StubAuthors { existence, author });
    api_router(Arc::new(lifecycle))
  }

  async fn app() -> Router { app_with(AuthorExistence::Exists, Some(jane())).await }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  async fn create_story(app: &Router) -> String {
    let (status, body) = send(
      app,
      "POST",
      "/publications",
      Some(json!({"title": "Short Story", "authorId": 42, "content": "Once upon a time"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_owned()
  }

  async fn set_status(app: &Router, id: &str, status: &str) -> (StatusCode, Value) {
    send(
      app,
      "PATCH",
      &format!("/publications/{id}/status"),
      Some(json!({ "status": status })),
    )
    .await
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_in_draft() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/publications",
      Some(json!({"title": "Short Story", "authorId": 42, "category": "fiction"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "DRAFT");
    assert_eq!(body["reviewCount"], 0);
    assert_eq!(body["authorId"], 42);
    assert_eq!(body["publicationType"], "LITERARY_WORK");
    assert_eq!(body["readyToPublish"], false);
  }

  #[tokio::test]
  async fn create_with_blank_title_is_400_invalid_publication() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/publications", Some(json!({"title": " ", "authorId": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_PUBLICATION");
    assert_eq!(body["status"], 400);
    assert!(body["timestamp"].is_string());
  }

  #[tokio::test]
  async fn create_with_unknown_author_is_400_and_persists_nothing() {
    let app = app_with(AuthorExistence::DoesNotExist, None).await;
    let (status, body) =
      send(&app, "POST", "/publications", Some(json!({"title": "T", "authorId": 9}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "AUTHOR_NOT_FOUND");

    let (_, page) = send(&app, "GET", "/publications", None).await;
    assert_eq!(page["totalElements"], 0);
  }

  #[tokio::test]
  async fn create_fails_closed_when_author_service_is_down() {
    let app = app_with(AuthorExistence::LookupFailed("connection refused".into()), None).await;
    let (status, body) =
      send(&app, "POST", "/publications", Some(json!({"title": "T", "authorId": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "AUTHOR_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("connection refused"));

    let (_, page) = send(&app, "GET", "/publications", None).await;
    assert_eq!(page["totalElements"], 0);
  }

  #[tokio::test]
  async fn malformed_json_is_400_bad_request() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/publications")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_returns_publication_with_author() {
    let app = app().await;
    let id = create_story(&app).await;

    let (status, body) = send(&app, "GET", &format!("/publications/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["author"]["name"], "Jane Doe");
  }

  #[tokio::test]
  async fn get_degrades_to_null_author_when_fetch_fails() {
    let app = app_with(AuthorExistence::Exists, None).await;
    let id = create_story(&app).await;

    let (status, body) = send(&app, "GET", &format!("/publications/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Short Story");
    assert!(body["author"].is_null());
  }

  #[tokio::test]
  async fn get_unknown_is_404() {
    let app = app().await;
    let (status, body) =
      send(&app, "GET", &format!("/publications/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "PUBLICATION_NOT_FOUND");
  }

  #[tokio::test]
  async fn get_with_malformed_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/publications/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
  }

  // ── Status ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn editorial_workflow_over_http() {
    let app = app().await;
    let id = create_story(&app).await;

    let (status, body) = set_status(&app, &id, "in_review").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "IN_REVIEW");
    assert_eq!(body["reviewCount"], 1);

    let (status, body) = set_status(&app, &id, "PUBLISHED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATE_TRANSITION");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("IN_REVIEW") && message.contains("PUBLISHED"), "{message}");

    let (status, body) = set_status(&app, &id, "APPROVED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["readyToPublish"], true);

    let (status, body) = set_status(&app, &id, "PUBLISHED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PUBLISHED");

    let (status, body) = set_status(&app, &id, "DRAFT").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATE_TRANSITION");
  }

  #[tokio::test]
  async fn unknown_status_is_400_invalid_status() {
    let app = app().await;
    let id = create_story(&app).await;
    let (status, body) = set_status(&app, &id, "ARCHIVED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATUS");
  }

  #[tokio::test]
  async fn status_update_on_unknown_id_is_404() {
    let app = app().await;
    let (status, _) = set_status(&app, &Uuid::new_v4().to_string(), "IN_REVIEW").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_prefers_status_filter_over_author_filter() {
    let app = app().await;
    let first = create_story(&app).await;
    create_story(&app).await;
    set_status(&app, &first, "IN_REVIEW").await;

    let (status, body) =
      send(&app, "GET", "/publications?status=in_review&authorId=999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["id"], first.as_str());

    let (_, body) = send(&app, "GET", "/publications?authorId=999", None).await;
    assert_eq!(body["totalElements"], 0);

    let (_, body) = send(&app, "GET", "/publications?page=0&size=1", None).await;
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn list_with_unknown_status_is_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/publications?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATUS");
  }
}
