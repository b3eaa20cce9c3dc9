//! PostgreSQL implementation of ProfileRepository
//!
//! Both lookups run as a single statement so counts and membership are read
//! from one snapshot.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidtube_core::{ChannelProfile, ProfileRepository, RepoResult, UserId, WatchHistoryEntry};

use crate::models::{ChannelProfileModel, WatchHistoryRow};

use super::error::map_db_error;

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn channel_profile(
        &self,
        viewer: UserId,
        username: &str,
    ) -> RepoResult<Option<ChannelProfile>> {
        let result = sqlx::query_as::<_, ChannelProfileModel>(
            r"
            SELECT u.id, u.full_name, u.username, u.email, u.avatar, u.cover_image,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id)
                       AS subscribers_count,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id)
                       AS channels_subscribed_to_count,
                   EXISTS(
                       SELECT 1 FROM subscriptions s
                       WHERE s.channel_id = u.id AND s.subscriber_id = $1
                   ) AS is_subscribed
            FROM users u
            WHERE u.username = $2
            ",
        )
        .bind(viewer.into_inner())
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelProfile::from))
    }

    #[instrument(skip(self))]
    async fn watch_history(&self, user: UserId) -> RepoResult<Vec<WatchHistoryEntry>> {
        // Entries whose video is gone drop out of the inner join
        let rows = sqlx::query_as::<_, WatchHistoryRow>(
            r"
            SELECT v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration,
                   v.views, v.is_published, v.created_at, v.updated_at,
                   o.full_name AS owner_full_name,
                   o.username AS owner_username,
                   o.avatar AS owner_avatar
            FROM users u
            CROSS JOIN LATERAL unnest(u.watch_history) WITH ORDINALITY AS h(video_id, position)
            JOIN videos v ON v.id = h.video_id
            JOIN users o ON o.id = v.owner_id
            WHERE u.id = $1
            ORDER BY h.position
            ",
        )
        .bind(user.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(WatchHistoryEntry::from).collect())
    }
}
