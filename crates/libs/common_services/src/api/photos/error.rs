use crate::api::error::ApiErrorKind;
use crate::database::DbError;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotosError {
    #[error("limit must be 1..{max}")]
    BadLimit { max: i64 },

    #[error("offset must be >= 0")]
    BadOffset,

    #[error("database error")]
    Database(#[from] DbError),
}

impl ApiErrorKind for PhotosError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadLimit { .. } | Self::BadOffset => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadLimit { .. } => "BAD_LIMIT",
            Self::BadOffset => "BAD_OFFSET",
            Self::Database(_) => "INTERNAL",
        }
    }
}
