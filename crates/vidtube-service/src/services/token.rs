//! Token service
//!
//! Issues, verifies and rotates access/refresh token pairs. The refresh token
//! stored on the user row is the only valid one; overwriting or clearing it
//! revokes every other refresh token of that user.

use tracing::{debug, instrument, warn};
use vidtube_common::{AppError, TokenPair};
use vidtube_core::{is_blank, User, UserId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const ISSUE_FAILED: &str = "Something went wrong while generating refresh and access token";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const INVALID_ACCESS_TOKEN: &str = "Invalid access token";

/// Token service
pub struct TokenService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TokenService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate a fresh pair and persist its refresh token on the user
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn issue(&self, user: &User) -> ServiceResult<TokenPair> {
        let pair = self.generate(user)?;

        self.ctx
            .user_repo()
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await
            .map_err(|e| {
                warn!(error = %e, "Persisting refresh token failed");
                ServiceError::internal(ISSUE_FAILED)
            })?;

        debug!("Issued token pair");
        Ok(pair)
    }

    /// Exchange a refresh token for a new pair
    ///
    /// Fails with 401 when the token is missing, invalid, expired, names an
    /// unknown user, or is not the one currently stored. The stored token is
    /// swapped only if it still equals the presented one, so two requests
    /// racing with the same token cannot both succeed.
    #[instrument(skip(self, presented))]
    pub async fn verify_and_rotate(&self, presented: Option<&str>) -> ServiceResult<(User, TokenPair)> {
        let presented = presented
            .map(str::trim)
            .filter(|t| !is_blank(t))
            .ok_or(ServiceError::App(AppError::MissingAuth))?;

        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(presented)
            .map_err(|_| ServiceError::unauthorized(INVALID_REFRESH_TOKEN))?;
        let user_id = claims
            .user_id()
            .map_err(|_| ServiceError::unauthorized(INVALID_REFRESH_TOKEN))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized(INVALID_REFRESH_TOKEN))?;

        let pair = self.generate(&user)?;
        let rotated = self
            .ctx
            .user_repo()
            .rotate_refresh_token(user.id, presented, &pair.refresh_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Persisting refresh token failed");
                ServiceError::internal(ISSUE_FAILED)
            })?;
        if !rotated {
            warn!(user_id = %user.id, "Refresh token reuse or revoked token presented");
            return Err(ServiceError::App(AppError::RefreshTokenReused));
        }

        debug!(user_id = %user.id, "Rotated token pair");
        Ok((user, pair))
    }

    /// Clear the stored refresh token
    #[instrument(skip(self))]
    pub async fn revoke(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.user_repo().set_refresh_token(user_id, None).await?;
        Ok(())
    }

    fn generate(&self, user: &User) -> ServiceResult<TokenPair> {
        self.ctx.jwt_service().generate_token_pair(user).map_err(|e| {
            warn!(error = %e, "Token generation failed");
            ServiceError::internal(ISSUE_FAILED)
        })
    }

    /// Resolve an access token to the user it names
    #[instrument(skip(self, access_token))]
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<User> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(access_token)
            .map_err(|_| ServiceError::unauthorized(INVALID_ACCESS_TOKEN))?;
        let user_id = claims
            .user_id()
            .map_err(|_| ServiceError::unauthorized(INVALID_ACCESS_TOKEN))?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized(INVALID_ACCESS_TOKEN))
    }
}
