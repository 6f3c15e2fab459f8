use crate::api_state::ApiContext;
use crate::request_id::CorrelationId;
use axum::Json;
use axum::extract::{Query, State};
use common_services::api::error::{RequestScoped, WithRequestId};
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::interfaces::{ListPhotosParams, ListPhotosResponse};
use common_services::api::photos::service::list_photos;
use tracing::instrument;

/// List stored photos, newest first.
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "Photos",
    params(
        ListPhotosParams
    ),
    responses(
        (status = 200, description = "One page of photos.", body = ListPhotosResponse),
        (status = 400, description = "`limit` or `offset` is invalid.", body = common_services::api::error::ErrorBody),
        (status = 500, description = "A database error occurred.", body = common_services::api::error::ErrorBody),
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn list_photos_handler(
    State(context): State<ApiContext>,
    CorrelationId(request_id): CorrelationId,
    Query(params): Query<ListPhotosParams>,
) -> Result<Json<ListPhotosResponse>, WithRequestId<PhotosError>> {
    list_photos(context.store.as_ref(), &context.settings.listing, &params)
        .await
        .map(Json)
        .map_err(|e| e.with_request_id(&request_id))
}
