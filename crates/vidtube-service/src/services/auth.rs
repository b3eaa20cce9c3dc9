//! Authentication service
//!
//! Handles user registration, login, token refresh, logout and password
//! changes.

use tracing::{info, instrument, warn};
use validator::Validate;
use vidtube_common::{AppError, TokenPair};
use vidtube_core::{is_blank, normalize_identity, User, UserId};

use crate::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileImages, RegisterRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::token::TokenService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Temp image files are always consumed: uploaded on success, removed on
    /// any failure. Media already hosted is deleted again when a later step
    /// fails, so a failed registration leaves nothing behind.
    #[instrument(skip(self, request, images), fields(username = %request.username))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        images: ProfileImages,
    ) -> ServiceResult<UserResponse> {
        if let Err(e) = self.check_registration(&request).await {
            images.discard().await;
            return Err(e);
        }

        let (avatar_path, cover_path) = match &images {
            ProfileImages::None => {
                return Err(ServiceError::validation("Avatar file is required"));
            }
            ProfileImages::AvatarOnly(avatar) => (avatar, None),
            ProfileImages::AvatarAndCover { avatar, cover } => (avatar, Some(cover)),
        };

        let storage = self.ctx.media_storage();
        let avatar = match storage.upload(avatar_path).await {
            Ok(uploaded) => uploaded.url,
            Err(e) => {
                warn!(error = %e, "Avatar upload failed");
                images.discard().await;
                return Err(ServiceError::internal("Error while uploading avatar"));
            }
        };
        let cover_image = match cover_path {
            Some(path) => match storage.upload(path).await {
                Ok(uploaded) => Some(uploaded.url),
                Err(e) => {
                    warn!(error = %e, "Cover image upload failed");
                    self.remove_hosted(&[avatar.as_str()]).await;
                    return Err(ServiceError::internal("Error while uploading cover image"));
                }
            },
            None => None,
        };

        let user = User::new(
            UserId::generate(),
            &request.username,
            &request.email,
            &request.full_name,
            avatar,
        )
        .with_cover_image(cover_image);

        if let Err(e) = self.create_user(&user, &request.password).await {
            let hosted: Vec<&str> = std::iter::once(user.avatar.as_str())
                .chain(user.cover_image.as_deref())
                .collect();
            self.remove_hosted(&hosted).await;
            return Err(e);
        }

        let created = self
            .ctx
            .user_repo()
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| ServiceError::internal("Something went wrong while registering the user"))?;

        info!(user_id = %created.id, "User registered");
        Ok(UserResponse::from(&created))
    }

    async fn create_user(&self, user: &User, password: &str) -> ServiceResult<()> {
        let password_hash = self.ctx.password_service().hash(password)?;
        self.ctx.user_repo().create(user, &password_hash).await?;
        Ok(())
    }

    /// Best-effort removal of media uploaded for a registration that failed
    async fn remove_hosted(&self, urls: &[&str]) {
        for url in urls {
            if let Err(e) = self.ctx.media_storage().delete(url).await {
                warn!(error = %e, url = %url, "Failed to remove uploaded media");
            }
        }
    }

    /// Field presence, format and uniqueness checks for registration
    async fn check_registration(&self, request: &RegisterRequest) -> ServiceResult<()> {
        if request.has_blank_field() {
            return Err(ServiceError::validation("All fields are required"));
        }
        request.validate()?;

        let username = normalize_identity(&request.username);
        let email = normalize_identity(&request.email);
        let existing = self
            .ctx
            .user_repo()
            .find_by_username_or_email(Some(&username), Some(&email))
            .await?;
        if existing.is_some() {
            return Err(ServiceError::conflict(
                "User with email or username already exists",
            ));
        }
        Ok(())
    }

    /// Login with username or email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let username = non_blank(request.username.as_deref());
        let email = non_blank(request.email.as_deref());
        if username.is_none() && email.is_none() {
            return Err(ServiceError::validation("username or email is required"));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_username_or_email(username.as_deref(), email.as_deref())
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = TokenService::new(self.ctx).issue(&user).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse::new(UserResponse::from(&user), tokens))
    }

    /// Revoke the user's refresh token
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: UserId) -> ServiceResult<()> {
        TokenService::new(self.ctx).revoke(user_id).await?;
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Rotate a refresh token into a new pair
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> ServiceResult<TokenPair> {
        let (user, tokens) = TokenService::new(self.ctx)
            .verify_and_rotate(refresh_token)
            .await?;
        info!(user_id = %user.id, "Access token refreshed");
        Ok(tokens)
    }

    /// Replace the password after checking the current one
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: UserId,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        request.validate()?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        if !self
            .ctx
            .password_service()
            .verify(&request.old_password, &current_hash)?
        {
            return Err(ServiceError::validation("Invalid old password"));
        }

        let new_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !is_blank(v)).map(normalize_identity)
}
