//! Route definitions
//!
//! User routes are mounted under /api/v1/users; health checks at the root.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{auth, health, profile, users};
use crate::state::AppState;

/// Create the API router (health checks are added separately so they bypass
/// rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1/users", user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        // Public
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::refresh_token))
        // Authenticated
        .route("/logout", post(auth::logout))
        .route("/change-password", post(auth::change_password))
        .route("/current-user", get(users::get_current_user))
        .route("/update", patch(users::update_account_details))
        .route("/avatar", patch(users::update_avatar))
        .route("/cover-image", patch(users::update_cover_image))
        .route("/c/:username", get(profile::get_channel_profile))
        .route("/history", get(profile::get_watch_history))
}
