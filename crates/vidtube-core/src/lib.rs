//! # vidtube-core
//!
//! Domain layer containing entities, typed ids, domain errors and the ports
//! (repository and media storage traits) the infrastructure crates implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    is_blank, normalize_identity, ChannelProfile, Subscription, User, Video, VideoOwner,
    WatchHistoryEntry,
};
pub use error::DomainError;
pub use traits::{MediaStorage, ProfileRepository, RepoResult, UploadedMedia, UserRepository};
pub use value_objects::{IdParseError, SubscriptionId, UserId, VideoId};
