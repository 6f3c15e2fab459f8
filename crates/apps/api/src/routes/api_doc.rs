use crate::routes::{photos, root, upload};
use axum::Json;
use common_services::api::error::ErrorBody;
use common_services::api::photos::interfaces::{ListPhotosResponse, PhotoItem};
use common_services::api::upload::interfaces::{SavedPhoto, UploadResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        photos::handlers::list_photos_handler,
        upload::handlers::upload_handler,
    ),
    components(
        schemas(
            ErrorBody,
            ListPhotosResponse,
            PhotoItem,
            SavedPhoto,
            UploadResponse,
            root::handlers::HealthResponse,
        ),
    ),
    tags(
        (name = "Gallery", description = "Photo gallery upload API"),
        (name = "Photos", description = "Browse stored photos"),
        (name = "Upload", description = "Ingest new photos"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
