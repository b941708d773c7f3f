//! Rust structs that represent database table mappings and the DTOs
//! derived from them.
//!
//! `User` is the persisted record; `PublicUser` / `RegisteredUser` are
//! the projections the API is allowed to return. The password hash and
//! the single-use invitation token never appear in a public view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Permission tier controlling authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserPermission {
    #[default]
    Regular,
    Admin,
}

/// User record as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub permission: UserPermission,
    pub is_verified: bool,
    pub invitation_token: Option<String>,
    pub session_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.permission == UserPermission::Admin
    }
}

/// Insert DTO: a user is created in a single atomic write, invitation
/// token included, so a crash can never leave a record without one.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub permission: UserPermission,
    pub is_verified: bool,
    pub invitation_token: Option<String>,
}

/// Partial update applied to an existing user. `None` fields are left
/// untouched; `clear_invitation_token` nulls the single-use token once
/// it has been consumed.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub permission: Option<UserPermission>,
    pub is_verified: Option<bool>,
    pub session_token: Option<String>,
    pub clear_invitation_token: bool,
}

/// Public projection of a user, safe to return from any endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub permission: UserPermission,
    pub is_verified: bool,
    /// Most recently issued session token, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            avatar: user.avatar,
            permission: user.permission,
            is_verified: user.is_verified,
            token: user.session_token,
        }
    }
}

/// Registration response: the public view plus the invitation token the
/// confirmation link is built from. Exposing the token here is a
/// deliberate test-environment shortcut around mail delivery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub permission: UserPermission,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_token: Option<String>,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            avatar: user.avatar,
            permission: user.permission,
            is_verified: user.is_verified,
            token: user.session_token,
            invitation_token: user.invitation_token,
        }
    }
}

/// Admin request to create a user. The initial password is generated
/// server-side; the caller may pre-set permission and verified state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub permission: Option<UserPermission>,
    pub is_verified: Option<bool>,
}

/// Partial update request for a user record. Which fields a caller may
/// set depends on their role and ownership (see `UserService::update`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub permission: Option<UserPermission>,
    pub is_verified: Option<bool>,
}
