//! User entity - an account that can log in and publish a channel

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, VideoId};

/// User account
///
/// The password hash and the stored refresh token never live on the entity;
/// they are only reachable through the credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    /// Unique, lowercase
    pub username: String,
    /// Unique, lowercase
    pub email: String,
    pub full_name: String,
    /// Hosted avatar URL (required)
    pub avatar: String,
    /// Hosted cover image URL
    pub cover_image: Option<String>,
    /// Videos the user watched, oldest first
    pub watch_history: Vec<VideoId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User, normalizing username and email
    pub fn new(
        id: UserId,
        username: &str,
        email: &str,
        full_name: &str,
        avatar: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: normalize_identity(username),
            email: normalize_identity(email),
            full_name: full_name.trim().to_string(),
            avatar,
            cover_image: None,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a cover image
    #[must_use]
    pub fn with_cover_image(mut self, cover_image: Option<String>) -> Self {
        self.cover_image = cover_image;
        self
    }

    /// Replace name and email
    pub fn set_account_details(&mut self, full_name: &str, email: &str) {
        self.full_name = full_name.trim().to_string();
        self.email = normalize_identity(email);
        self.updated_at = Utc::now();
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar: String) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }

    /// Update the cover image
    pub fn set_cover_image(&mut self, cover_image: String) {
        self.cover_image = Some(cover_image);
        self.updated_at = Utc::now();
    }
}

/// Canonical form of a username or email: trimmed and lowercase
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

/// True for empty or whitespace-only input
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
