//! Request payloads and the per-request identity type.

use crate::database::models::{User, UserPermission};
use serde::Deserialize;

/// Self-registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub permission: Option<UserPermission>,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Authenticated caller, inserted into request extensions by the auth
/// middleware once the bearer token has been resolved.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);
