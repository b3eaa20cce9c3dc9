//! JWT utilities for authentication
//!
//! Access and refresh tokens are signed with separate secrets, so a token of
//! one kind can never be verified as the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidtube_core::{User, UserId};

use crate::config::JwtConfig;
use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
    /// Access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Unique token id, refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is not a valid id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing material for one token kind
#[derive(Clone)]
struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: i64,
}

impl TokenKeys {
    fn new(secret: &str, expiry: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        }
    }
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    access: TokenKeys,
    refresh: TokenKeys,
}

impl JwtService {
    /// Create a new JWT service with separate access and refresh secrets
    #[must_use]
    pub fn new(
        access_secret: &str,
        access_token_expiry: i64,
        refresh_secret: &str,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            access: TokenKeys::new(access_secret, access_token_expiry),
            refresh: TokenKeys::new(refresh_secret, refresh_token_expiry),
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.access_token_secret,
            config.access_token_expiry,
            &config.refresh_token_secret,
            config.refresh_token_expiry,
        )
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access.expiry
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh.expiry
    }

    /// Generate an access/refresh pair for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(user.id)?,
        })
    }

    /// Short-lived token carrying id, username and email
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let mut claims = self.claims(user.id, TokenType::Access);
        claims.username = Some(user.username.clone());
        claims.email = Some(user.email.clone());
        encode(&Header::default(), &claims, &self.access.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode access token: {e}")))
    }

    /// Long-lived token carrying only the id and a unique token id
    pub fn generate_refresh_token(&self, user_id: UserId) -> Result<String, AppError> {
        let mut claims = self.claims(user_id, TokenType::Refresh);
        claims.jti = Some(Uuid::new_v4().to_string());
        encode(&Header::default(), &claims, &self.refresh.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode refresh token: {e}")))
    }

    fn claims(&self, user_id: UserId, token_type: TokenType) -> Claims {
        let now = Utc::now();
        let expiry = match token_type {
            TokenType::Access => self.access.expiry,
            TokenType::Refresh => self.refresh.expiry,
        };

        Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type,
            username: None,
            email: None,
            jti: None,
        }
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode_with(&self.access.decoding, token)?;
        if !claims.is_access_token() {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validate a refresh token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode_with(&self.refresh.decoding, token)?;
        if !claims.is_refresh_token() {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}

fn decode_with(key: &DecodingKey, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access.expiry)
            .field("refresh_token_expiry", &self.refresh.expiry)
            .finish_non_exhaustive()
    }
}
