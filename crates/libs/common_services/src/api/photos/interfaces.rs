use crate::database::photo::Photo;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw pagination parameters. Parsed by the service so that malformed values get the same
/// error codes as out-of-range ones.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListPhotosParams {
    /// Page size, `1..=maxPageSize`. Defaults to the configured page size.
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Number of photos to skip, `>= 0`. Defaults to 0.
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoItem {
    pub id: i64,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub path_original: String,
    /// RFC 3339, UTC, second precision.
    pub uploaded_at: String,
}

impl From<Photo> for PhotoItem {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            file_name: photo.file_name,
            mime_type: photo.mime_type,
            size_bytes: photo.size_bytes,
            path_original: photo.path_original,
            uploaded_at: photo.uploaded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPhotosResponse {
    pub items: Vec<PhotoItem>,
    pub count: usize,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub has_more: bool,
}
