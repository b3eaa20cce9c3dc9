//! Aggregation row -> read model mappers

use vidtube_core::{ChannelProfile, UserId, VideoId, VideoOwner, WatchHistoryEntry};

use crate::models::{ChannelProfileModel, WatchHistoryRow};

impl From<ChannelProfileModel> for ChannelProfile {
    fn from(model: ChannelProfileModel) -> Self {
        ChannelProfile {
            id: UserId::from_uuid(model.id),
            full_name: model.full_name,
            username: model.username,
            email: model.email,
            avatar: model.avatar,
            cover_image: model.cover_image,
            subscribers_count: model.subscribers_count,
            channels_subscribed_to_count: model.channels_subscribed_to_count,
            is_subscribed: model.is_subscribed,
        }
    }
}

impl From<WatchHistoryRow> for WatchHistoryEntry {
    fn from(row: WatchHistoryRow) -> Self {
        WatchHistoryEntry {
            id: VideoId::from_uuid(row.id),
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            duration: row.duration,
            views: row.views,
            is_published: row.is_published,
            owner: VideoOwner {
                full_name: row.owner_full_name,
                username: row.owner_username,
                avatar: row.owner_avatar,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
