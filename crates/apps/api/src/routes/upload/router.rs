use crate::api_state::ApiContext;
use crate::upload::handlers::upload_handler;
use app_state::UploadSettings;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::post};

pub fn upload_public_router(upload: &UploadSettings) -> Router<ApiContext> {
    Router::new()
        .route("/api/upload", post(upload_handler))
        .layer(DefaultBodyLimit::max(upload.max_request_bytes()))
}
