//! User entity <-> model mapper

use vidtube_core::{User, UserId, VideoId};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.id),
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            avatar: model.avatar,
            cover_image: model.cover_image,
            watch_history: model.watch_history.into_iter().map(VideoId::from_uuid).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
