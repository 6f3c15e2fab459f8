use crate::api::upload::classify::{Classification, classify};
use crate::api::upload::error::UploadError;
use crate::api::upload::interfaces::{SavedPhoto, UploadResponse};
use crate::api::upload::path_allocator::allocate_path;
use crate::database::photo::NewPhoto;
use crate::database::photo_store::PhotoStore;
use app_state::{COPY_CHUNK_SIZE, SNIFF_LEN, StorageSettings, UploadSettings};
use axum::extract::Multipart;
use chrono::Utc;
use futures_util::TryStreamExt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::{debug, info, instrument, warn};

/// Multipart field carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

/// Ingests every `files` part of a multipart upload, in order.
///
/// Stops at the first failing part. Parts saved before the failure stay saved.
pub async fn upload_photos(
    pipeline: &UploadPipeline<'_>,
    request_id: &str,
    mut multipart: Multipart,
) -> Result<UploadResponse, UploadError> {
    let mut saved = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::BadPayload(e.body_text()))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            debug!(request_id, "Skipping '{FILES_FIELD}' part without a file name");
            continue;
        };

        let reader = StreamReader::new(field.map_err(io::Error::other));
        tokio::pin!(reader);
        saved.push(pipeline.ingest(request_id, &file_name, reader).await?);
    }

    if saved.is_empty() {
        return Err(UploadError::NoFiles);
    }
    Ok(saved.into())
}

/// Turns one upload stream into a stored file plus a photo record, or into one error with
/// nothing left behind.
pub struct UploadPipeline<'a> {
    store: &'a dyn PhotoStore,
    data_root: &'a Path,
    max_bytes: u64,
}

struct CopiedFile {
    size: u64,
    mime: Option<&'static str>,
}

impl<'a> UploadPipeline<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn PhotoStore,
        storage: &'a StorageSettings,
        upload: &UploadSettings,
    ) -> Self {
        Self {
            store,
            data_root: &storage.data_root,
            max_bytes: upload.max_file_bytes(),
        }
    }

    /// Streams `source` to a freshly allocated path and records it.
    ///
    /// The staged file is removed on every failure, including a failed insert. Removal itself
    /// is best-effort and only logged.
    #[instrument(skip_all, fields(request_id = %request_id, file_name = %file_name))]
    pub async fn ingest<R>(
        &self,
        request_id: &str,
        file_name: &str,
        mut source: R,
    ) -> Result<SavedPhoto, UploadError>
    where
        R: AsyncRead + Unpin,
    {
        let allocated = allocate_path(self.data_root, Utc::now(), file_name);

        fs::create_dir_all(&allocated.directory)
            .await
            .map_err(|source| UploadError::StorageUnavailable {
                file_name: file_name.to_owned(),
                source,
            })?;

        let destination = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&allocated.disk_path)
            .await
            .map_err(|source| UploadError::StorageWrite {
                file_name: file_name.to_owned(),
                source,
            })?;
        let staged = StagedFile::new(allocated.disk_path.clone());

        let copied = match self.copy_limited(destination, &mut source, file_name).await {
            Ok(copied) => copied,
            Err(e) => {
                staged.discard().await;
                return Err(e);
            }
        };

        let photo = NewPhoto {
            file_name: file_name.to_owned(),
            mime_type: copied.mime.map(str::to_owned),
            size_bytes: i64::try_from(copied.size).unwrap_or(i64::MAX),
            path_original: allocated.url_path.clone(),
            uploaded_at: Utc::now(),
        };
        let id = match self.store.insert(&photo).await {
            Ok(id) => id,
            Err(source) => {
                staged.discard().await;
                return Err(UploadError::Persistence {
                    file_name: file_name.to_owned(),
                    source,
                });
            }
        };
        staged.keep();

        info!(
            id,
            size = copied.size,
            mime = copied.mime.unwrap_or("unknown"),
            url = %allocated.url_path,
            "Stored upload"
        );
        Ok(SavedPhoto {
            id,
            url: allocated.url_path,
        })
    }

    /// Copies `source` into `destination`, sniffing the first bytes and enforcing the ceiling
    /// while streaming. On overflow the bytes that still fit are written before failing.
    async fn copy_limited<R>(
        &self,
        mut destination: File,
        source: &mut R,
        file_name: &str,
    ) -> Result<CopiedFile, UploadError>
    where
        R: AsyncRead + Unpin,
    {
        let write_err = |source: io::Error| UploadError::StorageWrite {
            file_name: file_name.to_owned(),
            source,
        };
        let too_large = || UploadError::PayloadTooLarge {
            file_name: file_name.to_owned(),
            limit_bytes: self.max_bytes,
        };

        let mut head = [0u8; SNIFF_LEN];
        let head_len = read_head(source, &mut head).await.map_err(write_err)?;
        let head = &head[..head_len];
        destination.write_all(head).await.map_err(write_err)?;

        let Classification { mime, accepted } = classify(head, file_name);
        if !accepted {
            warn!(mime = mime.unwrap_or("unknown"), "Rejected upload: type not allowed");
            return Err(UploadError::UnsupportedMediaType {
                file_name: file_name.to_owned(),
                mime: mime.map(str::to_owned),
            });
        }

        let mut size = head_len as u64;
        if size > self.max_bytes {
            warn!(size, limit = self.max_bytes, "Rejected upload: too large");
            return Err(too_large());
        }

        let mut buffer = vec![0u8; COPY_CHUNK_SIZE];
        loop {
            let read = source.read(&mut buffer).await.map_err(write_err)?;
            if read == 0 {
                break;
            }
            let remaining = self.max_bytes - size;
            if read as u64 > remaining {
                let fits = remaining as usize;
                destination
                    .write_all(&buffer[..fits])
                    .await
                    .map_err(write_err)?;
                warn!(
                    size = size + remaining,
                    limit = self.max_bytes,
                    "Rejected upload: too large"
                );
                return Err(too_large());
            }
            destination
                .write_all(&buffer[..read])
                .await
                .map_err(write_err)?;
            size += read as u64;
        }

        destination.flush().await.map_err(write_err)?;
        Ok(CopiedFile { size, mime })
    }
}

/// Fills `buf` from `source`, stopping early only at end of stream.
async fn read_head<R>(source: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let read = source.read(&mut buf[filled..]).await?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}

/// A file on disk that is deleted on drop unless [`StagedFile::keep`] was called.
///
/// Covers early returns and requests that are dropped mid-upload alike.
struct StagedFile {
    path: PathBuf,
    keep: bool,
}

impl StagedFile {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn keep(mut self) {
        self.keep = true;
    }

    /// Removes the file without blocking the runtime. `Drop` only covers cancellation.
    async fn discard(mut self) {
        self.keep = true;
        match fs::remove_file(&self.path).await {
            Ok(()) => debug!("Removed staged file {}", self.path.display()),
            Err(e) => warn!(
                "Could not remove staged file {}, it is left orphaned: {e}",
                self.path.display()
            ),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed staged file {}", self.path.display()),
            Err(e) => warn!(
                "Could not remove staged file {}, it is left orphaned: {e}",
                self.path.display()
            ),
        }
    }
}
