use crate::utils::random_hex;
use app_state::{
    MEDIA_URL_PREFIX, ORIGINALS_DIR, PHOTOS_DIR, STORED_NAME_RANDOM_BYTES, UNNAMED_FILE,
    to_posix_string,
};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Longest file name most filesystems accept (`NAME_MAX`), in bytes.
const MAX_FILE_NAME_BYTES: usize = 255;
/// `<YYYYMMDDTHHMMSS>_<random hex>_` in front of every stored name.
const STORED_PREFIX_BYTES: usize = "YYYYMMDDTHHMMSS".len() + 1 + 2 * STORED_NAME_RANDOM_BYTES + 1;
/// Room left for the sanitized client name.
pub const MAX_SANITIZED_NAME_BYTES: usize = MAX_FILE_NAME_BYTES - STORED_PREFIX_BYTES;

/// Where a single upload goes, on disk and on the web.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedPath {
    /// `<root>/photos/original/<YYYY>/<MM>`
    pub directory: PathBuf,
    /// `<directory>/<stored_name>`
    pub disk_path: PathBuf,
    /// `<YYYYMMDDTHHMMSS>_<random hex>_<sanitized name>`
    pub stored_name: String,
    /// `/media/photos/original/<YYYY>/<MM>/<stored_name>`
    pub url_path: String,
}

/// Derives a collision-resistant location for an upload received at `now`.
///
/// Twelve random bytes go into every name, so two uploads of the same file in the same second
/// still land on different paths.
#[must_use]
pub fn allocate_path(data_root: &Path, now: DateTime<Utc>, original_name: &str) -> AllocatedPath {
    let relative_dir = Path::new(PHOTOS_DIR)
        .join(ORIGINALS_DIR)
        .join(now.format("%Y").to_string())
        .join(now.format("%m").to_string());

    let stored_name = format!(
        "{}_{}_{}",
        now.format("%Y%m%dT%H%M%S"),
        random_hex(STORED_NAME_RANDOM_BYTES),
        sanitize_file_name(original_name)
    );

    let directory = data_root.join(&relative_dir);
    let disk_path = directory.join(&stored_name);
    let url_path = format!(
        "{MEDIA_URL_PREFIX}/{}/{stored_name}",
        to_posix_string(&relative_dir)
    );

    AllocatedPath {
        directory,
        disk_path,
        stored_name,
        url_path,
    }
}

/// Makes an untrusted client file name safe to use as the last component of a path.
///
/// Directory components are dropped, spaces become underscores and `..` sequences are
/// neutralized. Control characters are replaced as well. Names longer than
/// [`MAX_SANITIZED_NAME_BYTES`] are shortened, keeping the extension.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .replace(' ', "_")
        .replace("..", "_")
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    if cleaned.is_empty() || cleaned == "." {
        UNNAMED_FILE.to_owned()
    } else {
        truncate_keeping_extension(&cleaned, MAX_SANITIZED_NAME_BYTES)
    }
}

fn truncate_keeping_extension(name: &str, max_bytes: usize) -> String {
    if name.len() <= max_bytes {
        return name.to_owned();
    }
    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot < max_bytes => name.split_at(dot),
        _ => (name, ""),
    };
    let cut = floor_char_boundary(stem, max_bytes - extension.len());
    format!("{}{extension}", &stem[..cut])
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}
