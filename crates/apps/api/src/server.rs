use crate::api_state::ApiContext;
use crate::create_router;
use crate::request_id::{MakeHexRequestId, X_REQUEST_ID};
use app_state::{AppSettings, MEDIA_URL_PREFIX, ORIGINALS_DIR, PHOTOS_DIR};
use axum::Router;
use axum::body::Body;
use axum::routing::get_service;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::database::get_db_pool;
use common_services::database::photo_store::PgPhotoStore;
use http::{HeaderValue, Request, header};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span};

pub async fn serve(settings: AppSettings) -> Result<()> {
    // --- Server Startup ---
    info!("🚀 Initializing server...");
    let pool = get_db_pool(&settings.database, &settings.secrets).await?;
    let api_state = ApiContext {
        store: Arc::new(PgPhotoStore::new(
            pool.clone(),
            settings.database.query_timeout(),
        )),
        settings: settings.clone(),
    };

    let app = build_app(api_state);

    let addr: SocketAddr = settings
        .api
        .address
        .parse()
        .map_err(|e| eyre!("Invalid address {}: {}", settings.api.address, e))?;
    let listener = TcpListener::bind(addr).await?;

    info!("🐸 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// The complete application: JSON API, web views and media files, wrapped in the
/// request-id, tracing, CORS and compression layers.
pub fn build_app(api_state: ApiContext) -> Router {
    let settings = api_state.settings.clone();

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
            X_REQUEST_ID.clone(),
        ])
        .expose_headers([X_REQUEST_ID.clone()]);

    // Stored originals never change once written.
    let serve_dir =
        ServeDir::new(settings.storage.originals_root()).append_index_html_on_directories(false);
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );
    let media_prefix = format!("{MEDIA_URL_PREFIX}/{PHOTOS_DIR}/{ORIGINALS_DIR}");

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id,
        )
    });

    // --- Create Router ---
    // The last layer added runs first: ids are assigned before tracing sees the request.
    create_router(api_state)
        .nest_service(&media_prefix, get_service(serve_dir).layer(cache_layer))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
        .layer(trace_layer)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeHexRequestId))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, draining connections");
}
