//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs (and conversions from domain types) for API outputs
//! - Uploaded file handles

pub mod requests;
pub mod responses;
pub mod uploads;

pub use requests::{
    ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateAccountRequest,
};
pub use responses::{
    ApiResponse, ChannelProfileResponse, EmptyData, HealthChecks, HealthResponse, LoginResponse,
    ReadinessResponse, UserResponse, VideoOwnerResponse, WatchHistoryItemResponse,
};
pub use uploads::{remove_temp_file, ProfileImages};
