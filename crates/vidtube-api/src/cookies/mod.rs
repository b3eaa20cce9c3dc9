//! Auth cookies
//!
//! Both tokens travel as `httpOnly`, `secure` cookies scoped to `/`.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use vidtube_common::TokenPair;

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn auth_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

/// Set both token cookies
#[must_use]
pub fn with_tokens(jar: CookieJar, tokens: &TokenPair) -> CookieJar {
    jar.add(auth_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token.clone()))
        .add(auth_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()))
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = auth_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

/// Expire both token cookies, whether or not the request carried them
#[must_use]
pub fn without_tokens(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE))
}

/// Value of a cookie, ignoring blank values
pub fn token_from(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}
