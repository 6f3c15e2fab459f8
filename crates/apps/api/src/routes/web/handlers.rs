use app_state::{AppSettings, SLIDESHOW_DEFAULT_INTERVAL, SLIDESHOW_MAX_INTERVAL};
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");
const SLIDESHOW_HTML: &str = include_str!("../../../assets/slideshow.html");

#[derive(Debug, Default, Deserialize)]
pub struct SlideshowParams {
    pub interval: Option<String>,
}

/// Upload form plus a paginated grid of stored photos.
pub async fn index_page(State(settings): State<AppSettings>) -> Html<String> {
    Html(
        INDEX_HTML
            .replace(
                "{{PAGE_SIZE}}",
                &settings.listing.default_page_size.to_string(),
            )
            .replace("{{UPLOAD_MAX_MB}}", &settings.upload.max_mb.to_string()),
    )
}

/// Full-screen slideshow over every stored photo, in random order.
pub async fn slideshow_page(
    State(settings): State<AppSettings>,
    Query(params): Query<SlideshowParams>,
) -> Html<String> {
    let interval = slideshow_interval(params.interval.as_deref());
    Html(
        SLIDESHOW_HTML
            .replace("{{INTERVAL_SECONDS}}", &interval.to_string())
            .replace(
                "{{MAX_PAGE_SIZE}}",
                &settings.listing.max_page_size.to_string(),
            ),
    )
}

/// Seconds between slides. Anything outside `1..=60` falls back to the default.
fn slideshow_interval(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| (1..=SLIDESHOW_MAX_INTERVAL).contains(v))
        .unwrap_or(SLIDESHOW_DEFAULT_INTERVAL)
}
