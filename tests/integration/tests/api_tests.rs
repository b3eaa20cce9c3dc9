//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`; they are skipped when it is unset. Migrations run on server
//! start.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::{multipart::Form, StatusCode};

async fn register(server: &TestServer, form: &RegisterForm) -> UserResponse {
    let response = server
        .post_multipart("/register", form.with_avatar())
        .await
        .unwrap();
    assert_data(response, StatusCode::CREATED).await.unwrap()
}

async fn register_and_login(server: &TestServer) -> (RegisterForm, LoginResponse) {
    let form = RegisterForm::unique();
    register(server, &form).await;
    let response = server
        .post("/login", &LoginRequest::by_username(&form))
        .await
        .unwrap();
    let login = assert_data(response, StatusCode::OK).await.unwrap();
    (form, login)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_multipart("/register", form.with_avatar_and_cover())
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(envelope.status_code, 201);
    assert_eq!(envelope.message, "User registered successfully");
    let user = envelope.data;
    assert_eq!(user.username, form.username.to_lowercase());
    assert_eq!(user.email, form.email.to_lowercase());
    assert_eq!(user.full_name, form.full_name);
    assert!(user.watch_history.is_empty());
    assert!(user.cover_image.is_some());

    // Uploaded avatar is served from /media
    let avatar = server.get_url(&user.avatar).await.unwrap();
    assert_status(avatar, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();
    register(&server, &form).await;

    let mut same_email = RegisterForm::unique();
    same_email.email = form.email.to_uppercase();
    let response = server
        .post_multipart("/register", same_email.with_avatar())
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert!(!error.success);
    assert_eq!(error.message, "User with email or username already exists");

    // The rejected username was never stored
    let response = server
        .post("/login", &LoginRequest::by_username(&same_email))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_register_without_avatar() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_multipart("/register", form.without_files())
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "Avatar file is required");

    // A lone cover image is not enough either
    let response = server
        .post_multipart(
            "/register",
            form.without_files().part("coverImage", png_part("cover.png")),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Login / Token Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_cookies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();
    register(&server, &form).await;

    let response = server
        .post("/login", &LoginRequest::by_email(&form))
        .await
        .unwrap();
    let cookies: Vec<String> = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let login: LoginResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(login.user.username, form.username.to_lowercase());
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(&format!("accessToken={}", login.access_token))));
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(&format!("refreshToken={}", login.refresh_token))));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly") && c.contains("Secure")));
}

#[tokio::test]
async fn test_login_failures() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();
    register(&server, &form).await;

    let mut wrong = LoginRequest::by_username(&form);
    wrong.password = "wrong-password".to_string();
    let response = server.post("/login", &wrong).await.unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.message, "Invalid user credentials");

    let unknown = LoginRequest::by_username(&RegisterForm::unique());
    let response = server.post("/login", &unknown).await.unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.message, "User does not exist");
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;

    let response = server
        .post(
            "/refresh-token",
            &RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: TokenPairResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, login.refresh_token);

    // The replaced token is no longer accepted
    let response = server
        .post(
            "/refresh-token",
            &RefreshRequest {
                refresh_token: login.refresh_token,
            },
        )
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.message, "Refresh token is expired or used");

    // The new one works, sent as a cookie
    let response = server
        .client
        .post(format!("{}/api/v1/users/refresh-token", server.base_url()))
        .header(
            reqwest::header::COOKIE,
            format!("refreshToken={}", rotated.refresh_token),
        )
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;

    let response = server
        .post_auth("/logout", &login.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let envelope: Envelope<serde_json::Value> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.message, "User logged out");

    let response = server
        .post(
            "/refresh-token",
            &RefreshRequest {
                refresh_token: login.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;

    let response = server
        .get_auth("/current-user", &login.access_token)
        .await
        .unwrap();
    let user: UserResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.id, login.user.id);

    let response = server.get_auth("/current-user", "garbage").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, login) = register_and_login(&server).await;

    let response = server
        .post_auth(
            "/change-password",
            &login.access_token,
            &ChangePasswordRequest {
                old_password: "not-it".to_string(),
                new_password: "NewPass456!".to_string(),
            },
        )
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "Invalid old password");

    let response = server
        .post_auth(
            "/change-password",
            &login.access_token,
            &ChangePasswordRequest {
                old_password: form.password.clone(),
                new_password: "NewPass456!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let mut relogin = LoginRequest::by_username(&form);
    relogin.password = "NewPass456!".to_string();
    let response = server.post("/login", &relogin).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_account_details() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;
    let new_email = format!("updated{}@example.com", unique_suffix());

    let response = server
        .patch_auth(
            "/update",
            &login.access_token,
            &UpdateAccountRequest {
                full_name: "Renamed User".to_string(),
                email: new_email.clone(),
            },
        )
        .await
        .unwrap();
    let user: UserResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.full_name, "Renamed User");
    assert_eq!(user.email, new_email);

    let response = server
        .patch_auth(
            "/update",
            &login.access_token,
            &UpdateAccountRequest {
                full_name: String::new(),
                email: new_email,
            },
        )
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "All fields are required");
}

#[tokio::test]
async fn test_update_images() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;

    let response = server
        .patch_multipart("/avatar", &login.access_token, Form::new())
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "Avatar file is missing");

    let response = server
        .patch_multipart(
            "/avatar",
            &login.access_token,
            Form::new().part("avatar", png_part("new.png")),
        )
        .await
        .unwrap();
    let user: UserResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_ne!(user.avatar, login.user.avatar);

    let response = server
        .patch_multipart(
            "/cover-image",
            &login.access_token,
            Form::new().part("coverImage", png_part("banner.png")),
        )
        .await
        .unwrap();
    let user: UserResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(user.cover_image.is_some());
}

// ============================================================================
// Channel / History Tests
// ============================================================================

#[tokio::test]
async fn test_channel_profile_without_subscribers() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (channel_form, _) = register_and_login(&server).await;
    let (_, viewer) = register_and_login(&server).await;

    let path = format!("/c/{}", channel_form.username);
    let response = server.get_auth(&path, &viewer.access_token).await.unwrap();
    let profile: ChannelProfileResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.username, channel_form.username.to_lowercase());
    assert_eq!(profile.full_name, channel_form.full_name);
    assert_eq!(profile.subscribers_count, 0);
    assert_eq!(profile.channels_subscribed_to_count, 0);
    assert!(!profile.is_subscribed);
    assert!(!profile.id.is_empty());

    let response = server
        .get_auth("/c/no-such-channel-here", &viewer.access_token)
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.message, "Channel does not exist");
}

#[tokio::test]
async fn test_empty_watch_history() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = register_and_login(&server).await;

    let response = server.get_auth("/history", &login.access_token).await.unwrap();
    let history: Vec<serde_json::Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(history.is_empty());
}
