mod repositories;
mod storage;

pub use repositories::{ProfileRepository, RepoResult, UserRepository};
pub use storage::{MediaStorage, UploadedMedia};
