use crate::{
    ApiSettings, DatabaseSettings, ListingSettings, LoggingSettings, ORIGINALS_DIR, PHOTOS_DIR,
    RawSettings, SecretSettings, UploadSettings, mb_to_bytes,
};
use color_eyre::eyre::{Result, bail};
use serde::Deserialize;
use std::path::{PathBuf, absolute};
use std::time::Duration;

/// Validated application settings. Built once at startup and handed to every component.
#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub listing: ListingSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Absolute data root.
    pub data_root: PathBuf,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        if raw.upload.max_mb == 0 {
            bail!("upload.max_mb must be greater than 0");
        }
        if raw.upload.max_request_mb < raw.upload.max_mb {
            bail!(
                "upload.max_request_mb ({}) must be at least upload.max_mb ({})",
                raw.upload.max_request_mb,
                raw.upload.max_mb
            );
        }
        let listing = &raw.listing;
        if listing.max_page_size < 1 {
            bail!("listing.max_page_size must be at least 1");
        }
        if !(1..=listing.max_page_size).contains(&listing.default_page_size) {
            bail!(
                "listing.default_page_size must be within 1..={}, got {}",
                listing.max_page_size,
                listing.default_page_size
            );
        }

        let data_root = absolute(&raw.storage.data_root)?;

        Ok(Self {
            api: raw.api,
            storage: StorageSettings { data_root },
            upload: raw.upload,
            listing: raw.listing,
            database: raw.database,
            logging: raw.logging,
            secrets: raw.secrets,
        })
    }
}

impl StorageSettings {
    /// Folder holding all uploaded originals.
    #[must_use]
    pub fn originals_root(&self) -> PathBuf {
        self.data_root.join(PHOTOS_DIR).join(ORIGINALS_DIR)
    }
}

impl UploadSettings {
    #[must_use]
    pub const fn max_file_bytes(&self) -> u64 {
        mb_to_bytes(self.max_mb)
    }

    #[must_use]
    pub fn max_request_bytes(&self) -> usize {
        usize::try_from(mb_to_bytes(self.max_request_mb)).unwrap_or(usize::MAX)
    }
}

impl DatabaseSettings {
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}
