use crate::database::DbError;
use crate::database::photo::{NewPhoto, Photo, PhotoPage};
use crate::database::photo_store::PhotoStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory `PhotoStore` with fault injection, for tests.
#[derive(Debug, Default)]
pub struct MemoryPhotoStore {
    photos: Mutex<Vec<Photo>>,
    fail_inserts: bool,
    fail_reads: bool,
    calls: AtomicUsize,
}

impl MemoryPhotoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `insert` always fails, as if the database went away mid-upload.
    #[must_use]
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    /// A store where every call fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            fail_inserts: true,
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Number of `insert`, `list` and `ping` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.photos
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn insert(&self, photo: &NewPhoto) -> Result<i64, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        let mut photos = self.photos.lock().unwrap_or_else(PoisonError::into_inner);
        let id = photos.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        photos.push(photo.clone().into_photo(id));
        Ok(id)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<PhotoPage, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        let mut photos = self.photos();
        photos.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = photos.len() as i64;
        let items = photos
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect();
        Ok(PhotoPage { items, total })
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
