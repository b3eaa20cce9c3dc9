//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and file uploads.

mod auth;
mod upload;
mod validated;

pub(crate) use validated::json_rejection;

pub use auth::AuthUser;
pub use upload::UploadForm;
pub use validated::ValidatedJson;
