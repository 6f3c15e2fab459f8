use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common_services::database::photo_store::PhotoStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::error;
use utoipa::ToSchema;

const HEALTH_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "Database is reachable.", body = HealthResponse),
        (status = 503, description = "Database did not answer within 500ms.", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(store): State<Arc<dyn PhotoStore>>,
) -> (StatusCode, Json<HealthResponse>) {
    match timeout(HEALTH_TIMEOUT, store.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, Json(HealthResponse { ok: true })),
        Ok(Err(e)) => {
            error!("Health check failed: database connection error: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { ok: false }),
            )
        }
        Err(_) => {
            error!("Health check failed: database ping timed out");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { ok: false }),
            )
        }
    }
}
