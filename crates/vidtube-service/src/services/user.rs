//! User service
//!
//! Account details and profile images of the current user.

use std::path::PathBuf;

use tracing::{info, instrument, warn};
use validator::Validate;
use vidtube_core::{is_blank, normalize_identity, DomainError, RepoResult, User, UserId};

use crate::dto::{UpdateAccountRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the user with the given id
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::not_found("User does not exist"))
    }

    /// Replace full name and email
    #[instrument(skip(self, request))]
    pub async fn update_account_details(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> ServiceResult<UserResponse> {
        if is_blank(&request.full_name) || is_blank(&request.email) {
            return Err(ServiceError::validation("All fields are required"));
        }
        let request = UpdateAccountRequest {
            full_name: request.full_name.trim().to_string(),
            email: normalize_identity(&request.email),
        };
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .update_account_details(user_id, &request.full_name, &request.email)
            .await
            .map_err(|e| match e {
                DomainError::UserAlreadyExists => ServiceError::conflict("Email is already in use"),
                other => other.into(),
            })?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        info!(user_id = %user_id, "Account details updated");
        Ok(UserResponse::from(&user))
    }

    /// Upload and set a new avatar
    #[instrument(skip(self))]
    pub async fn update_avatar(
        &self,
        user_id: UserId,
        file: Option<PathBuf>,
    ) -> ServiceResult<UserResponse> {
        let file = file.ok_or_else(|| ServiceError::validation("Avatar file is missing"))?;

        let uploaded = self.ctx.media_storage().upload(&file).await.map_err(|e| {
            warn!(error = %e, "Avatar upload failed");
            ServiceError::internal("Error while uploading avatar")
        })?;

        let updated = self.ctx.user_repo().update_avatar(user_id, &uploaded.url).await;
        let user = self.saved_or_discard(&uploaded.url, updated).await?;

        info!(user_id = %user_id, "Avatar updated");
        Ok(UserResponse::from(&user))
    }

    /// Upload and set a new cover image
    #[instrument(skip(self))]
    pub async fn update_cover_image(
        &self,
        user_id: UserId,
        file: Option<PathBuf>,
    ) -> ServiceResult<UserResponse> {
        let file = file.ok_or_else(|| ServiceError::validation("Cover image file is missing"))?;

        let uploaded = self.ctx.media_storage().upload(&file).await.map_err(|e| {
            warn!(error = %e, "Cover image upload failed");
            ServiceError::internal("Error while uploading cover image")
        })?;

        let updated = self.ctx.user_repo().update_cover_image(user_id, &uploaded.url).await;
        let user = self.saved_or_discard(&uploaded.url, updated).await?;

        info!(user_id = %user_id, "Cover image updated");
        Ok(UserResponse::from(&user))
    }

    /// Removes the new upload again when it could not be saved on the user
    async fn saved_or_discard(
        &self,
        url: &str,
        updated: RepoResult<Option<User>>,
    ) -> ServiceResult<User> {
        let outcome = updated
            .map_err(ServiceError::from)
            .and_then(|user| user.ok_or_else(|| ServiceError::not_found("User does not exist")));

        if outcome.is_err() {
            if let Err(e) = self.ctx.media_storage().delete(url).await {
                warn!(error = %e, url = %url, "Failed to remove uploaded media");
            }
        }
        outcome
    }
}
