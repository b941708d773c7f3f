//! Database repository for user records.
//!
//! `UserStore` is the narrow interface the flows are built against:
//! find-by-filter, insert, update-by-id, delete-by-id. The SQLite
//! implementation keeps every write to a single statement, so user
//! creation persists the invitation token atomically with the record.

use crate::database::models::{NewUser, User, UserPatch};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, email, password_hash, avatar, permission, is_verified, \
     invitation_token, session_token, created_at, updated_at";

/// Narrow persistence interface for the User entity.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_invitation_token(&self, token: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Checks whether another user already holds the given email.
    async fn email_exists_excluding(&self, email: &str, exclude_user_id: &str) -> Result<bool>;
    /// Applies a partial update; returns the updated record, or `None`
    /// when no user has the given id.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>>;
    /// Hard-deletes a user; returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// SQLite-backed `UserStore`.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(new_user.id)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.avatar)
        .bind(new_user.permission)
        .bind(new_user.is_verified)
        .bind(new_user.invitation_token)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_invitation_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE invitation_token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn email_exists_excluding(&self, email: &str, exclude_user_id: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? AND id != ?")
                .bind(email)
                .bind(exclude_user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 email = COALESCE(?, email), \
                 password_hash = COALESCE(?, password_hash), \
                 permission = COALESCE(?, permission), \
                 is_verified = COALESCE(?, is_verified), \
                 session_token = COALESCE(?, session_token), \
                 invitation_token = CASE WHEN ? THEN NULL ELSE invitation_token END, \
                 updated_at = ? \
             WHERE id = ? \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(patch.email)
        .bind(patch.password_hash)
        .bind(patch.permission)
        .bind(patch.is_verified)
        .bind(patch.session_token)
        .bind(patch.clear_invitation_token)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
