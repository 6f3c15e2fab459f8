use crate::api_state::ApiContext;
use crate::photos::handlers::list_photos_handler;
use axum::{Router, routing::get};

pub fn photos_public_router() -> Router<ApiContext> {
    Router::new().route("/api/photos", get(list_photos_handler))
}
