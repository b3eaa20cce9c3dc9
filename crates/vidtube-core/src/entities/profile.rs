//! Aggregated read models
//!
//! These are not stored anywhere; they are assembled by joining users, videos
//! and subscriptions at query time.

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, VideoId};

/// A user viewed as a channel, with derived subscription counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelProfile {
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    /// Number of users subscribed to this channel
    pub subscribers_count: i64,
    /// Number of channels this user subscribes to
    pub channels_subscribed_to_count: i64,
    /// Whether the viewing user is one of the subscribers
    pub is_subscribed: bool,
}

/// Reduced projection of a video owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOwner {
    pub full_name: String,
    pub username: String,
    pub avatar: String,
}

/// One resolved entry of a user's watch history
#[derive(Debug, Clone, PartialEq)]
pub struct WatchHistoryEntry {
    pub id: VideoId,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: VideoOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
