//! Rows produced by the aggregation queries

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the channel profile query
#[derive(Debug, Clone, FromRow)]
pub struct ChannelProfileModel {
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
}

/// One video of the watch history joined with its owner
#[derive(Debug, Clone, FromRow)]
pub struct WatchHistoryRow {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_full_name: String,
    pub owner_username: String,
    pub owner_avatar: String,
}
