use crate::api_state::ApiContext;
use crate::web::handlers::{index_page, slideshow_page};
use axum::{Router, routing::get};

pub fn web_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(index_page))
        .route("/slideshow", get(slideshow_page))
}
