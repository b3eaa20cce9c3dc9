//! User handlers
//!
//! The current user's account details and profile images.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use vidtube_service::dto::{UpdateAccountRequest, UserResponse};
use vidtube_service::UserService;

use crate::extractors::{json_rejection, AuthUser, UploadForm};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Get the current user
///
/// GET /api/v1/users/current-user
pub async fn get_current_user(auth: AuthUser) -> ApiJson<UserResponse> {
    ApiJson::ok(
        UserResponse::from(auth.into_user()),
        "Current user fetched successfully",
    )
}

/// Update full name and email
///
/// PATCH /api/v1/users/update
pub async fn update_account_details(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> ApiResult<ApiJson<UserResponse>> {
    let Json(request) = body.map_err(json_rejection)?;
    let user = UserService::new(state.service_context())
        .update_account_details(auth.id(), request)
        .await?;

    Ok(ApiJson::ok(user, "Account details updated successfully"))
}

/// Replace the avatar
///
/// PATCH /api/v1/users/avatar (multipart, file `avatar`)
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: UploadForm,
) -> ApiResult<ApiJson<UserResponse>> {
    let file = form.take_file("avatar");
    form.discard().await;

    let user = UserService::new(state.service_context())
        .update_avatar(auth.id(), file)
        .await?;

    Ok(ApiJson::ok(user, "Avatar image updated successfully"))
}

/// Replace the cover image
///
/// PATCH /api/v1/users/cover-image (multipart, file `coverImage`)
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: UploadForm,
) -> ApiResult<ApiJson<UserResponse>> {
    let file = form.take_file("coverImage");
    form.discard().await;

    let user = UserService::new(state.service_context())
        .update_cover_image(auth.id(), file)
        .await?;

    Ok(ApiJson::ok(user, "Cover image updated successfully"))
}
