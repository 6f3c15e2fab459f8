use crate::api_state::ApiContext;
use crate::request_id::CorrelationId;
use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use common_services::api::error::{RequestScoped, WithRequestId};
use common_services::api::upload::error::UploadError;
use common_services::api::upload::interfaces::UploadResponse;
use common_services::api::upload::service::{UploadPipeline, upload_photos};
use tracing::{info, instrument};

/// Upload one or more photos.
///
/// Every `files` part is stored and recorded in order. Processing stops at the first failing
/// file; files before it stay saved.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Upload",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "One or more parts named `files`, each with a file name."
    ),
    responses(
        (status = 200, description = "All files were stored.", body = UploadResponse),
        (status = 400, description = "Malformed body, no files, or a file was rejected.", body = common_services::api::error::ErrorBody),
        (status = 500, description = "Storage or database failure.", body = common_services::api::error::ErrorBody),
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn upload_handler(
    State(context): State<ApiContext>,
    CorrelationId(request_id): CorrelationId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, WithRequestId<UploadError>> {
    let multipart = multipart
        .map_err(|e| UploadError::BadPayload(e.body_text()).with_request_id(&request_id))?;

    let pipeline = UploadPipeline::new(
        context.store.as_ref(),
        &context.settings.storage,
        &context.settings.upload,
    );
    let response = upload_photos(&pipeline, &request_id, multipart)
        .await
        .map_err(|e| e.with_request_id(&request_id))?;

    info!(count = response.count, "Upload complete");
    Ok(Json(response))
}
