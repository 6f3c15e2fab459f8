use crate::database::photo::{NewPhoto, Photo, PhotoPage};
use crate::database::{DbError, with_timeout};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

/// Persistence for photo records.
///
/// Implementations must assign ids that are unique and increase monotonically, and must order
/// listings by `uploaded_at` descending, ties broken by `id` descending.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Records a photo and returns its store-assigned id.
    async fn insert(&self, photo: &NewPhoto) -> Result<i64, DbError>;

    /// Returns one page of photos and the total photo count. `limit` and `offset` are trusted.
    /// The count is a separate read and may disagree with `items` under concurrent writes.
    async fn list(&self, limit: i64, offset: i64) -> Result<PhotoPage, DbError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), DbError>;
}

/// `PhotoStore` backed by Postgres. Every call is bounded by `query_timeout`.
#[derive(Clone)]
pub struct PgPhotoStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgPhotoStore {
    #[must_use]
    pub const fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn insert(&self, photo: &NewPhoto) -> Result<i64, DbError> {
        // created_at stays NULL until capture dates are extracted.
        let query = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO photos (file_name, mime_type, size_bytes, path_original, created_at, uploaded_at)
            VALUES ($1, $2, $3, $4, NULL, $5)
            RETURNING id
            ",
        )
        .bind(&photo.file_name)
        .bind(&photo.mime_type)
        .bind(photo.size_bytes)
        .bind(&photo.path_original)
        .bind(photo.uploaded_at)
        .fetch_one(&self.pool);

        with_timeout(self.query_timeout, query).await
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<PhotoPage, DbError> {
        let items_query = sqlx::query_as::<_, Photo>(
            r"
            SELECT id, file_name, mime_type, size_bytes, path_original, uploaded_at
            FROM photos
            ORDER BY uploaded_at DESC, id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool);
        let items = with_timeout(self.query_timeout, items_query).await?;

        let count_query = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photos")
            .fetch_one(&self.pool);
        let total = with_timeout(self.query_timeout, count_query).await?;

        Ok(PhotoPage { items, total })
    }

    async fn ping(&self) -> Result<(), DbError> {
        let query = sqlx::query("SELECT 1").execute(&self.pool);
        with_timeout(self.query_timeout, query).await?;
        Ok(())
    }
}
