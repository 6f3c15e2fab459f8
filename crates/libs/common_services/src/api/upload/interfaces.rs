use serde::Serialize;
use utoipa::ToSchema;

/// A successfully ingested file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SavedPhoto {
    pub id: i64,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub saved: Vec<SavedPhoto>,
    pub count: usize,
}

impl From<Vec<SavedPhoto>> for UploadResponse {
    fn from(saved: Vec<SavedPhoto>) -> Self {
        Self {
            count: saved.len(),
            saved,
        }
    }
}
