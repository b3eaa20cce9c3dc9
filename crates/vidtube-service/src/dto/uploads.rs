//! Uploaded image files handed to the services
//!
//! Paths point at temporary files written by the HTTP layer. Whoever consumes
//! a path is responsible for removing it.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Optional profile images of a registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileImages {
    None,
    AvatarOnly(PathBuf),
    AvatarAndCover { avatar: PathBuf, cover: PathBuf },
}

impl ProfileImages {
    /// Build from the optional files. A cover without an avatar is dropped and
    /// its file removed.
    pub async fn from_parts(avatar: Option<PathBuf>, cover: Option<PathBuf>) -> Self {
        match (avatar, cover) {
            (Some(avatar), Some(cover)) => Self::AvatarAndCover { avatar, cover },
            (Some(avatar), None) => Self::AvatarOnly(avatar),
            (None, cover) => {
                if let Some(cover) = cover {
                    remove_temp_file(&cover).await;
                }
                Self::None
            }
        }
    }

    pub fn avatar(&self) -> Option<&Path> {
        match self {
            Self::None => None,
            Self::AvatarOnly(avatar) | Self::AvatarAndCover { avatar, .. } => Some(avatar),
        }
    }

    pub fn cover(&self) -> Option<&Path> {
        match self {
            Self::AvatarAndCover { cover, .. } => Some(cover),
            _ => None,
        }
    }

    /// Remove every temp file without uploading
    pub async fn discard(&self) {
        for path in self.avatar().into_iter().chain(self.cover()) {
            remove_temp_file(path).await;
        }
    }
}

/// Best-effort removal of a temporary upload
pub async fn remove_temp_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove temp file");
        }
    }
}
