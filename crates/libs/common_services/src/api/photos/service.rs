use crate::api::photos::error::PhotosError;
use crate::api::photos::interfaces::{ListPhotosParams, ListPhotosResponse, PhotoItem};
use crate::database::photo_store::PhotoStore;
use app_state::ListingSettings;

/// Fetches one page of photos, newest first.
///
/// # Errors
///
/// Returns `BadLimit` or `BadOffset` for invalid parameters, before the store is touched, and
/// `Database` if the store fails.
pub async fn list_photos(
    store: &dyn PhotoStore,
    listing: &ListingSettings,
    params: &ListPhotosParams,
) -> Result<ListPhotosResponse, PhotosError> {
    let limit = parse_limit(params.limit.as_deref(), listing)?;
    let offset = parse_offset(params.offset.as_deref())?;

    let page = store.list(limit, offset).await?;
    let items: Vec<PhotoItem> = page.items.into_iter().map(PhotoItem::from).collect();
    let count = items.len();

    Ok(ListPhotosResponse {
        has_more: offset + (count as i64) < page.total,
        items,
        count,
        limit,
        offset,
        total: page.total,
    })
}

fn parse_limit(raw: Option<&str>, listing: &ListingSettings) -> Result<i64, PhotosError> {
    let bad_limit = PhotosError::BadLimit {
        max: listing.max_page_size,
    };
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(listing.default_page_size),
        Some(value) => match value.parse::<i64>() {
            Ok(limit) if (1..=listing.max_page_size).contains(&limit) => Ok(limit),
            _ => Err(bad_limit),
        },
    }
}

fn parse_offset(raw: Option<&str>) -> Result<i64, PhotosError> {
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(0),
        Some(value) => match value.parse::<i64>() {
            Ok(offset) if offset >= 0 => Ok(offset),
            _ => Err(PhotosError::BadOffset),
        },
    }
}
