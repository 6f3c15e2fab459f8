/// Top-level folder below the data root that holds everything photo related.
pub const PHOTOS_DIR: &str = "photos";
/// Folder below [`PHOTOS_DIR`] holding the uploaded originals, partitioned by `<year>/<month>`.
pub const ORIGINALS_DIR: &str = "original";
/// Public URL prefix under which the data root is exposed.
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Number of leading bytes inspected when sniffing the content type of an upload.
pub const SNIFF_LEN: usize = 512;
/// Buffer size used when streaming an upload to disk.
pub const COPY_CHUNK_SIZE: usize = 32 * 1024;
/// Number of random bytes embedded in every stored file name.
pub const STORED_NAME_RANDOM_BYTES: usize = 12;
/// Substitute for client file names that sanitize to nothing.
pub const UNNAMED_FILE: &str = "unnamed";

/// Slideshow interval bounds, in seconds.
pub const SLIDESHOW_DEFAULT_INTERVAL: u32 = 3;
pub const SLIDESHOW_MAX_INTERVAL: u32 = 60;
