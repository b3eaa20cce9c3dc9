//! Media storage port

use std::path::Path;

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Result of a successful media upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Publicly reachable URL
    pub url: String,
}

/// Moves a locally received file to hosted storage.
///
/// Implementations remove the local file once the attempt finishes, whether it
/// succeeded or not.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(&self, local_path: &Path) -> RepoResult<UploadedMedia>;

    /// Remove previously uploaded media. Unknown files are not an error.
    async fn delete(&self, url: &str) -> RepoResult<()>;
}
