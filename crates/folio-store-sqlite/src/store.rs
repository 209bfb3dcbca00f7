//! [`SqliteStore`] is the SQLite implementation of [`PublicationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use folio_core::{
  publication::{NewPublication, Publication, PublicationStatus},
  store::{Page, PageRequest, PublicationFilter, PublicationStore},
};

use crate::{
  Result,
  encode::{
    PUBLICATION_COLUMNS, RawPublication, encode_dt, encode_kind, encode_status, encode_uuid,
    encode_version, store_precision,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio publication store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `WHERE` clause and its single bound parameter for a filter.
fn filter_clause(filter: PublicationFilter) -> (&'static str, Vec<Value>) {
  match filter {
    PublicationFilter::All => ("", vec![]),
    PublicationFilter::ByStatus(status) => (
      "WHERE status = ?1",
      vec![Value::Text(encode_status(status).to_owned())],
    ),
    PublicationFilter::ByAuthor(author_id) => {
      ("WHERE author_id = ?1", vec![Value::Integer(author_id)])
    }
  }
}

// ─── PublicationStore impl ───────────────────────────────────────────────────

impl PublicationStore for SqliteStore {
  type Error = crate::Error;

  async fn create_publication(&self, input: NewPublication) -> Result<Publication> {
    let now = store_precision(Utc::now());
    let publication = Publication {
      publication_id: Uuid::new_v4(),
      kind:           input.kind,
      title:          input.title,
      description:    input.description,
      content:        input.content,
      author_id:      input.author_id.unwrap_or_default(),
      status:         PublicationStatus::Draft,
      category:       input.category,
      review_count:   0,
      version:        0,
      created_at:     now,
      updated_at:     now,
    };

    let id_str      = encode_uuid(publication.publication_id);
    let kind_str    = encode_kind(publication.kind).to_owned();
    let title       = publication.title.clone();
    let description = publication.description.clone();
    let content     = publication.content.clone();
    let author_id   = publication.author_id;
    let status_str  = encode_status(publication.status).to_owned();
    let category    = publication.category.clone();
    let at_str      = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO publications (
             publication_id, kind, title, description, content, author_id,
             status, category, review_count, version, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, ?9, ?9)",
          rusqlite::params![
            id_str,
            kind_str,
            title,
            description,
            content,
            author_id,
            status_str,
            category,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(publication)
  }

  async fn get_publication(&self, id: Uuid) -> Result<Option<Publication>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPublication> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PUBLICATION_COLUMNS} FROM publications WHERE publication_id = ?1"),
              rusqlite::params![id_str],
              RawPublication::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPublication::into_publication).transpose()
  }

  async fn update_publication<'a>(
    &'a self,
    publication: &'a Publication,
  ) -> Result<Option<Publication>> {
    let updated_at   = store_precision(publication.updated_at);
    let id_str       = encode_uuid(publication.publication_id);
    let status_str   = encode_status(publication.status).to_owned();
    let review_count = i64::from(publication.review_count);
    let at_str       = encode_dt(updated_at);
    let expected     = encode_version(publication.version)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE publications
              SET status = ?1, review_count = ?2, updated_at = ?3,
                  version = version + 1
            WHERE publication_id = ?4 AND version = ?5",
          rusqlite::params![status_str, review_count, at_str, id_str, expected],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }

    Ok(Some(Publication {
      version: publication.version + 1,
      updated_at,
      ..publication.clone()
    }))
  }

  async fn list_publications(
    &self,
    filter: PublicationFilter,
    page: PageRequest,
  ) -> Result<Page<Publication>> {
    let (where_clause, params) = filter_clause(filter);
    let limit  = i64::from(page.size);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let (total, raws): (i64, Vec<RawPublication>) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM publications {where_clause}"),
          rusqlite::params_from_iter(params.iter()),
          |row| row.get(0),
        )?;

        let n = params.len();
        let sql = format!(
          "SELECT {PUBLICATION_COLUMNS} FROM publications {where_clause}
           ORDER BY created_at, publication_id
           LIMIT ?{} OFFSET ?{}",
          n + 1,
          n + 2,
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(
              params
                .iter()
                .cloned()
                .chain([Value::Integer(limit), Value::Integer(offset)]),
            ),
            RawPublication::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawPublication::into_publication)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(items, page, u64::try_from(total).unwrap_or_default()))
  }
}
