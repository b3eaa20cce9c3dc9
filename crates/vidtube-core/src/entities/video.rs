//! Video entity

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, VideoId};

/// Published video document
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: VideoId,
    /// Hosted URL of the video file
    pub video_file: String,
    /// Hosted URL of the thumbnail
    pub thumbnail: String,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    /// Duration in seconds
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
