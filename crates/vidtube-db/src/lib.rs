//! # vidtube-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the channel profile and watch
//!   history aggregations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidtube_db::{create_pool, run_migrations, PgUserRepository};
//!
//! async fn example(config: &vidtube_common::DatabaseConfig) -> anyhow::Result<()> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, ping, run_migrations, PgPool};
pub use repositories::{PgProfileRepository, PgUserRepository};
