use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::error::Error;
use std::fmt::Write;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Maps a service error onto the transport: an HTTP status and a stable machine-readable code.
pub trait ApiErrorKind: Error {
    fn status(&self) -> StatusCode;

    fn code(&self) -> &'static str;
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_id: String,
}

/// A service error paired with the id of the request it happened in.
#[derive(Debug)]
pub struct WithRequestId<E> {
    pub request_id: String,
    pub error: E,
}

pub trait RequestScoped: Sized {
    fn with_request_id(self, request_id: &str) -> WithRequestId<Self>;
}

impl<E: ApiErrorKind> RequestScoped for E {
    fn with_request_id(self, request_id: &str) -> WithRequestId<Self> {
        WithRequestId {
            request_id: request_id.to_owned(),
            error: self,
        }
    }
}

impl<E: ApiErrorKind> IntoResponse for WithRequestId<E> {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let code = self.error.code();
        if status.is_server_error() {
            error!(
                request_id = %self.request_id,
                code,
                "Request failed: {}",
                error_chain(&self.error)
            );
        } else {
            warn!(request_id = %self.request_id, code, "Request rejected: {}", self.error);
        }

        let body = ErrorBody {
            code: code.to_owned(),
            message: self.error.to_string(),
            request_id: self.request_id,
        };
        (status, Json(body)).into_response()
    }
}

/// Renders an error and all of its sources as `outer: inner: ...`.
#[must_use]
pub fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let _ = write!(out, ": {inner}");
        source = inner.source();
    }
    out
}
