//! Filesystem-backed media storage
//!
//! Uploaded files are moved into a media directory under a random name and
//! exposed at `{base_url}/{name}`. The HTTP layer serves that directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use vidtube_core::{DomainError, MediaStorage, RepoResult, UploadedMedia};

use crate::config::StorageConfig;

/// Stores media on the local disk
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    media_dir: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(media_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            media_dir: media_dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.media_dir.clone(), config.media_base_url.clone())
    }

    async fn store(&self, local_path: &Path) -> RepoResult<UploadedMedia> {
        let metadata = fs::metadata(local_path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", local_path.display())))?;
        if !metadata.is_file() {
            return Err(DomainError::StorageError(format!(
                "{} is not a file",
                local_path.display()
            )));
        }

        fs::create_dir_all(&self.media_dir)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        let name = stored_name(local_path);
        let target = self.media_dir.join(&name);

        // rename fails across filesystems, fall back to copying
        if fs::rename(local_path, &target).await.is_err() {
            fs::copy(local_path, &target)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }

        debug!(file = %name, "Stored media file");
        Ok(UploadedMedia {
            url: format!("{}/{name}", self.base_url),
        })
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    #[instrument(skip(self))]
    async fn upload(&self, local_path: &Path) -> RepoResult<UploadedMedia> {
        let result = self.store(local_path).await;

        // Temp file must not outlive the attempt
        if let Err(e) = fs::remove_file(local_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %local_path.display(), error = %e, "Failed to remove temp file");
            }
        }

        result
    }

    #[instrument(skip(self))]
    async fn delete(&self, url: &str) -> RepoResult<()> {
        let name = url
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| {
                !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
            })
            .ok_or_else(|| DomainError::StorageError(format!("{url} is not stored here")))?;

        match fs::remove_file(self.media_dir.join(name)).await {
            Ok(()) => {
                debug!(file = %name, "Deleted media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::StorageError(e.to_string())),
        }
    }
}

/// Random file name that keeps the original extension
fn stored_name(path: &Path) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
        _ => id,
    }
}
