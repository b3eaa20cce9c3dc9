//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidtube_core::{DomainError, RepoResult, User, UserId, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, full_name, avatar, cover_image, watch_history,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<User>> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, full_name, avatar, cover_image, watch_history,
                   created_at, updated_at
            FROM users
            WHERE username = $1 OR email = $2
            ORDER BY created_at
            LIMIT 1
            ",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let watch_history: Vec<_> = user.watch_history.iter().map(|v| v.into_inner()).collect();

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, full_name, avatar, cover_image,
                               password_hash, watch_history, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar)
        .bind(user.cover_image.as_deref())
        .bind(password_hash)
        .bind(watch_history)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UserAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_account_details(
        &self,
        id: UserId,
        full_name: &str,
        email: &str,
    ) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET full_name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, full_name, avatar, cover_image, watch_history,
                      created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(full_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UserAlreadyExists))?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn update_avatar(&self, id: UserId, avatar: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET avatar = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, full_name, avatar, cover_image, watch_history,
                      created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn update_cover_image(
        &self,
        id: UserId,
        cover_image: &str,
    ) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET cover_image = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, full_name, avatar, cover_image, watch_history,
                      created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(cover_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> RepoResult<()> {
        // Single column write, the rest of the row is left untouched
        let result = sqlx::query(
            r"
            UPDATE users SET refresh_token = $2 WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, presented, next))]
    async fn rotate_refresh_token(
        &self,
        id: UserId,
        presented: &str,
        next: &str,
    ) -> RepoResult<bool> {
        // Compare and swap in one statement; a concurrent rotation wins at most once
        let result = sqlx::query(
            r"
            UPDATE users SET refresh_token = $3 WHERE id = $1 AND refresh_token = $2
            ",
        )
        .bind(id.into_inner())
        .bind(presented)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
