//! Channel profile and watch history handlers

use axum::extract::{Path, State};
use vidtube_service::dto::{ChannelProfileResponse, WatchHistoryItemResponse};
use vidtube_service::ProfileService;

use crate::extractors::AuthUser;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/v1/users/c/:username
pub async fn get_channel_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<ApiJson<ChannelProfileResponse>> {
    let profile = ProfileService::new(state.service_context())
        .channel_profile(auth.id(), &username)
        .await?;

    Ok(ApiJson::ok(profile, "User channel fetched successfully"))
}

/// GET /api/v1/users/history
pub async fn get_watch_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<WatchHistoryItemResponse>>> {
    let history = ProfileService::new(state.service_context())
        .watch_history(auth.id())
        .await?;

    Ok(ApiJson::ok(history, "Watch history fetched successfully"))
}
