use serde::Deserialize;
use std::path::PathBuf;

/// Settings exactly as they come out of the layered config sources, before validation.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub storage: RawStorageSettings,
    pub upload: UploadSettings,
    pub listing: ListingSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Socket address to listen on, e.g. `0.0.0.0:8080`.
    pub address: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawStorageSettings {
    /// Folder under which `photos/original/<year>/<month>` is created.
    pub data_root: PathBuf,
}

/// Limits applied to uploads.
#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    /// Per-file ceiling in megabytes.
    pub max_mb: u64,
    /// Ceiling for a whole multipart request body in megabytes.
    pub max_request_mb: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingSettings {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

/// Database connection pool configuration. Durations are in seconds unless noted.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
    /// Upper bound for a single query, in milliseconds.
    pub query_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}
