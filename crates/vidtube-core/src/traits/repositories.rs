//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{ChannelProfile, User, WatchHistoryEntry};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Credential store: user records, password hashes and refresh tokens
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find the first user matching either the username or the email
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<User>>;

    /// Create a new user. Fails with `UserAlreadyExists` on a duplicate username or email.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Replace full name and email, returning the updated user
    async fn update_account_details(
        &self,
        id: UserId,
        full_name: &str,
        email: &str,
    ) -> RepoResult<Option<User>>;

    /// Replace the avatar URL, returning the updated user
    async fn update_avatar(&self, id: UserId, avatar: &str) -> RepoResult<Option<User>>;

    /// Replace the cover image URL, returning the updated user
    async fn update_cover_image(&self, id: UserId, cover_image: &str)
        -> RepoResult<Option<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;

    /// Overwrite (or clear) the stored refresh token
    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> RepoResult<()>;

    /// Replace the stored refresh token with `next` only while it still equals
    /// `presented`. Returns `false` when nothing was replaced.
    async fn rotate_refresh_token(
        &self,
        id: UserId,
        presented: &str,
        next: &str,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Profile Repository
// ============================================================================

/// Aggregation queries over users, videos and subscriptions
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Channel view of `username` as seen by `viewer`, `None` when no such user
    async fn channel_profile(
        &self,
        viewer: UserId,
        username: &str,
    ) -> RepoResult<Option<ChannelProfile>>;

    /// Resolved watch history of `user`, in list order
    async fn watch_history(&self, user: UserId) -> RepoResult<Vec<WatchHistoryEntry>>;
}
