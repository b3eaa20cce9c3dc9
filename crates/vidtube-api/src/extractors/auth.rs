//! Authentication extractor
//!
//! Reads the access token from the `accessToken` cookie, falling back to an
//! `Authorization: Bearer` header, and loads the user it names.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use vidtube_core::{User, UserId};
use vidtube_service::TokenService;

use crate::cookies::{token_from, ACCESS_TOKEN_COOKIE};
use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user, loaded fresh from the credential store
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = match token_from(&jar, ACCESS_TOKEN_COOKIE) {
            Some(token) => token,
            None => TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
                .map_err(|_| ApiError::MissingAuth)?,
        };

        let app_state = AppState::from_ref(state);
        let user = TokenService::new(app_state.service_context())
            .authenticate(&token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                e
            })?;

        Ok(AuthUser(user))
    }
}
