mod api_doc;
pub mod photos;
pub mod root;
pub mod upload;
pub mod web;

use crate::api_state::ApiContext;
use crate::photos::router::photos_public_router;
use crate::root::router::root_public_router;
use crate::routes::api_doc::openapi_json;
use crate::upload::router::upload_public_router;
use crate::web::router::web_public_router;
use app_state::UploadSettings;
use axum::Router;
use axum::routing::get;

pub use api_doc::ApiDoc;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .route("/api/openapi.json", get(openapi_json))
        .merge(public_routes(&api_state.settings.upload))
        .with_state(api_state)
}

fn public_routes(upload: &UploadSettings) -> Router<ApiContext> {
    Router::new()
        .merge(root_public_router())
        .merge(photos_public_router())
        .merge(upload_public_router(upload))
        .merge(web_public_router())
}
