//! Profile service
//!
//! Read-only aggregations: a channel page for a username and the resolved
//! watch history of the current user.

use tracing::{debug, instrument};
use vidtube_core::{is_blank, normalize_identity, UserId};

use crate::dto::{ChannelProfileResponse, WatchHistoryItemResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Channel profile of `username` as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn channel_profile(
        &self,
        viewer: UserId,
        username: &str,
    ) -> ServiceResult<ChannelProfileResponse> {
        if is_blank(username) {
            return Err(ServiceError::validation("username is missing"));
        }
        let username = normalize_identity(username);

        let profile = self
            .ctx
            .profile_repo()
            .channel_profile(viewer, &username)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel does not exist"))?;

        debug!(
            channel_id = %profile.id,
            subscribers = profile.subscribers_count,
            "Channel profile loaded"
        );
        Ok(ChannelProfileResponse::from(profile))
    }

    /// Watch history of `user_id`, oldest first
    #[instrument(skip(self))]
    pub async fn watch_history(
        &self,
        user_id: UserId,
    ) -> ServiceResult<Vec<WatchHistoryItemResponse>> {
        let entries = self.ctx.profile_repo().watch_history(user_id).await?;
        debug!(count = entries.len(), "Watch history loaded");
        Ok(entries.into_iter().map(WatchHistoryItemResponse::from).collect())
    }
}
