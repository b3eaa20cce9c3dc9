//! # vidtube-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! media storage, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, JwtService, PasswordService, TokenPair, TokenType};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, StorageConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use storage::LocalMediaStorage;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
