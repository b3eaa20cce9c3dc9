//! Authentication handlers
//!
//! Endpoints for registration, login, logout, token refresh and password
//! changes.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use vidtube_common::TokenPair;
use vidtube_service::dto::{
    ChangePasswordRequest, EmptyData, LoginRequest, LoginResponse, ProfileImages,
    RefreshTokenRequest, RegisterRequest, UserResponse,
};
use vidtube_service::AuthService;

use crate::cookies::{token_from, with_tokens, without_tokens, REFRESH_TOKEN_COOKIE};
use crate::extractors::{AuthUser, UploadForm, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/v1/users/register (multipart)
pub async fn register(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> ApiResult<ApiJson<UserResponse>> {
    let request = RegisterRequest {
        full_name: form.text("fullName"),
        email: form.text("email"),
        username: form.text("username"),
        password: form.text("password"),
    };
    let avatar = form.take_file("avatar");
    let cover = form.take_file("coverImage");
    form.discard().await;

    let images = ProfileImages::from_parts(avatar, cover).await;
    let user = AuthService::new(state.service_context())
        .register(request, images)
        .await?;

    Ok(ApiJson::created(user, "User registered successfully"))
}

/// Login with username or email and password
///
/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, ApiJson<LoginResponse>)> {
    let response = AuthService::new(state.service_context()).login(request).await?;
    let jar = with_tokens(jar, &response.tokens());

    Ok((jar, ApiJson::ok(response, "User logged in successfully")))
}

/// Logout the current user
///
/// POST /api/v1/users/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> ApiResult<(CookieJar, ApiJson<EmptyData>)> {
    AuthService::new(state.service_context())
        .logout(auth.id())
        .await?;

    Ok((without_tokens(jar), ApiJson::ok(EmptyData {}, "User logged out")))
}

/// Exchange a refresh token for a new pair
///
/// POST /api/v1/users/refresh-token
///
/// The `refreshToken` cookie wins over the JSON body.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<(CookieJar, ApiJson<TokenPair>)> {
    let presented = token_from(&jar, REFRESH_TOKEN_COOKIE)
        .or_else(|| body.and_then(|Json(request)| request.refresh_token));

    let tokens = AuthService::new(state.service_context())
        .refresh(presented.as_deref())
        .await?;
    let jar = with_tokens(jar, &tokens);

    Ok((jar, ApiJson::ok(tokens, "Access token refreshed")))
}

/// Change the current user's password
///
/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<ApiJson<EmptyData>> {
    AuthService::new(state.service_context())
        .change_password(auth.id(), request)
        .await?;

    Ok(ApiJson::ok(EmptyData {}, "Password changed successfully"))
}
