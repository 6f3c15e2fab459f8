use crate::api::error::ApiErrorKind;
use crate::database::DbError;
use axum::http::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid multipart form: {0}")]
    BadPayload(String),

    #[error("no files provided (use field name 'files')")]
    NoFiles,

    #[error("{file_name}: file type not allowed")]
    UnsupportedMediaType {
        file_name: String,
        mime: Option<String>,
    },

    #[error("{file_name}: file exceeds max size of {limit_bytes} bytes")]
    PayloadTooLarge { file_name: String, limit_bytes: u64 },

    #[error("{file_name}: storage unavailable")]
    StorageUnavailable {
        file_name: String,
        #[source]
        source: io::Error,
    },

    #[error("{file_name}: failed to store file")]
    StorageWrite {
        file_name: String,
        #[source]
        source: io::Error,
    },

    #[error("{file_name}: database error")]
    Persistence {
        file_name: String,
        #[source]
        source: DbError,
    },
}

impl ApiErrorKind for UploadError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadPayload(_)
            | Self::NoFiles
            | Self::UnsupportedMediaType { .. }
            | Self::PayloadTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::StorageUnavailable { .. } | Self::StorageWrite { .. } | Self::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadPayload(_) => "BAD_PAYLOAD",
            Self::NoFiles => "NO_FILES",
            Self::UnsupportedMediaType { .. } | Self::PayloadTooLarge { .. } => "UPLOAD_FAILED",
            Self::StorageUnavailable { .. } | Self::StorageWrite { .. } | Self::Persistence { .. } => {
                "INTERNAL"
            }
        }
    }
}
