use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of the `photos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Photo {
    pub id: i64,
    /// Name as supplied by the client. Untrusted.
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    /// Public path under `/media/`.
    pub path_original: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A photo that has been written to disk and is ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub path_original: String,
    pub uploaded_at: DateTime<Utc>,
}

impl NewPhoto {
    #[must_use]
    pub fn into_photo(self, id: i64) -> Photo {
        Photo {
            id,
            file_name: self.file_name,
            mime_type: self.mime_type,
            size_bytes: self.size_bytes,
            path_original: self.path_original,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// A page of photos plus the total number of photos in the table.
#[derive(Debug, Clone, Default)]
pub struct PhotoPage {
    pub items: Vec<Photo>,
    pub total: i64,
}
