//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase keys. Ids are
//! serialized as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vidtube_common::TokenPair;
use vidtube_core::{ChannelProfile, User, VideoOwner, WatchHistoryEntry};

// ============================================================================
// Envelope
// ============================================================================

/// Success envelope: `{statusCode, data, message, success}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }
}

/// Serializes as `{}`
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyData {}

// ============================================================================
// User Responses
// ============================================================================

/// User as returned to its owner. Never carries the password or refresh token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub watch_history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            watch_history: user.watch_history.iter().map(ToString::to_string).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(user: UserResponse, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }

    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

// ============================================================================
// Profile Responses
// ============================================================================

/// Channel page of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfileResponse {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub email: String,
}

impl From<ChannelProfile> for ChannelProfileResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            full_name: profile.full_name,
            username: profile.username,
            subscribers_count: profile.subscribers_count,
            channels_subscribed_to_count: profile.channels_subscribed_to_count,
            is_subscribed: profile.is_subscribed,
            avatar: profile.avatar,
            cover_image: profile.cover_image,
            email: profile.email,
        }
    }
}

/// Owner projection inside a watch history entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOwnerResponse {
    pub full_name: String,
    pub username: String,
    pub avatar: String,
}

impl From<VideoOwner> for VideoOwnerResponse {
    fn from(owner: VideoOwner) -> Self {
        Self {
            full_name: owner.full_name,
            username: owner.username,
            avatar: owner.avatar,
        }
    }
}

/// Watched video with its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryItemResponse {
    pub id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: VideoOwnerResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WatchHistoryEntry> for WatchHistoryItemResponse {
    fn from(entry: WatchHistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            video_file: entry.video_file,
            thumbnail: entry.thumbnail,
            title: entry.title,
            description: entry.description,
            duration: entry.duration,
            views: entry.views,
            is_published: entry.is_published,
            owner: entry.owner.into(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
