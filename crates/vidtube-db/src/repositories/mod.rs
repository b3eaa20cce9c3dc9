//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vidtube-core.

mod error;
mod profile;
mod user;

pub use profile::PgProfileRepository;
pub use user::PgUserRepository;
