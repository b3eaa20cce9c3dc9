//! Database models - SQLx-compatible structs for PostgreSQL rows

mod profile;
mod user;

pub use profile::{ChannelProfileModel, WatchHistoryRow};
pub use user::UserModel;
