//! Domain entities - core business objects

mod profile;
mod subscription;
mod user;
mod video;

pub use profile::{ChannelProfile, VideoOwner, WatchHistoryEntry};
pub use subscription::Subscription;
pub use user::{is_blank, normalize_identity, User};
pub use video::Video;
