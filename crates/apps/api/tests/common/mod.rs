#![allow(dead_code)]

use app_state::{
    ApiSettings, AppSettings, DatabaseSettings, ListingSettings, LoggingSettings, SecretSettings,
    StorageSettings, UploadSettings,
};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use color_eyre::Result;
use common_services::database::memory_photo_store::MemoryPhotoStore;
use gallery_api::api_state::ApiContext;
use gallery_api::build_app;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "gallery-test-boundary";

pub const JPEG: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01,
];
pub const PNG: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryPhotoStore>,
    pub settings: AppSettings,
    // Keeps the data root alive for the duration of the test.
    pub data_dir: TempDir,
}

pub fn test_settings(data_root: &Path) -> AppSettings {
    AppSettings {
        api: ApiSettings {
            address: "127.0.0.1:0".to_owned(),
            allowed_origins: vec![],
        },
        storage: StorageSettings {
            data_root: data_root.to_path_buf(),
        },
        upload: UploadSettings {
            max_mb: 1,
            max_request_mb: 8,
        },
        listing: ListingSettings {
            default_page_size: 50,
            max_page_size: 500,
        },
        database: DatabaseSettings {
            max_connections: 1,
            min_connections: 0,
            max_lifetime: 60,
            idle_timeout: 60,
            acquire_timeout: 1,
            query_timeout_ms: 500,
        },
        logging: LoggingSettings {
            level: "debug".to_owned(),
        },
        secrets: SecretSettings {
            database_url: "postgres://unused".to_owned(),
        },
    }
}

pub fn test_app(store: MemoryPhotoStore) -> Result<TestApp> {
    let data_dir = tempfile::tempdir()?;
    let settings = test_settings(data_dir.path());
    std::fs::create_dir_all(settings.storage.originals_root())?;

    let store = Arc::new(store);
    let app = build_app(ApiContext {
        store: store.clone(),
        settings: settings.clone(),
    });
    Ok(TestApp {
        app,
        store,
        settings,
        data_dir,
    })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        Ok(self.app.clone().oneshot(request).await?)
    }

    pub async fn get(&self, uri: &str) -> Result<Response<Body>> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    /// Every regular file below the originals folder.
    pub fn stored_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        collect_files(&self.settings.storage.originals_root(), &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// One multipart part. `file_name: None` produces a plain form field.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(file_name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "files",
            file_name: Some(file_name),
            data,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>]) -> Result<Request<Body>> {
    Ok(Request::post("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))?)
}

pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    Ok(response.into_body().collect().await?.to_bytes().to_vec())
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    Ok(serde_json::from_slice(&body_bytes(response).await?)?)
}

pub fn request_id_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
