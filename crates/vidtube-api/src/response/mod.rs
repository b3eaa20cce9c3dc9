//! Response types and error handling for API endpoints
//!
//! Every response uses the same envelope: `ApiJson` for success and the
//! `ErrorResponse` body rendered by `ApiError` for failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;
use vidtube_common::{AppError, ErrorResponse};
use vidtube_core::DomainError;
use vidtube_service::dto::ApiResponse;
use vidtube_service::{validation_messages, ServiceError};

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{}", validation_messages(.0).join(", "))]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Multipart(String),

    #[error("Unauthorized request")]
    MissingAuth,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => vidtube_common::domain_status(e),
            Self::Validation(_) | Self::InvalidBody(_) | Self::Multipart(_) => 400,
            Self::MissingAuth => 401,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Multipart(_) => "INVALID_MULTIPART",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Message shown to clients; server error details stay in the logs
    fn public_message(&self) -> String {
        match self {
            Self::Service(e) => e.public_message(),
            _ if self.status_code().is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Body of the failure envelope
    #[must_use]
    pub fn to_error_response(&self) -> ErrorResponse {
        let body = ErrorResponse::new(self.status_code().as_u16(), self.public_message());
        match self {
            Self::Validation(errors) => body.with_errors(validation_messages(errors)),
            _ => body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Success envelope: `{statusCode, data, message, success}`
#[derive(Debug)]
pub struct ApiJson<T>(pub ApiResponse<T>);

impl<T> ApiJson<T> {
    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self(ApiResponse::ok(data, message))
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self(ApiResponse::new(StatusCode::CREATED.as_u16(), data, message))
    }
}

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}
