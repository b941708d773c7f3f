//! HTTP handlers for the authentication endpoints.

use crate::auth::models::{CurrentUser, LoginRequest, RegisterRequest};
use crate::auth::service::AuthService;
use crate::database::models::{PublicUser, RegisteredUser};
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Extension, Json};

/// `POST /register`: creates an unverified account.
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ServiceResult<(StatusCode, Json<RegisteredUser>)> {
    let user = AuthService::new(&state).register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /login`: validates credentials and returns the user with a
/// fresh session token.
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ServiceResult<Json<PublicUser>> {
    let user = AuthService::new(&state).login(payload).await?;
    Ok(Json(user))
}

/// `GET /confirm/{token}`: consumes the invitation token and redirects
/// to the frontend login page with the freshly issued session token.
pub async fn confirm_email(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
) -> ServiceResult<Redirect> {
    let session_token = AuthService::new(&state).confirm_email(&token).await?;
    let target = format!("{}/login?token={}", state.config.frontend_url, session_token);
    Ok(Redirect::to(&target))
}

/// `GET /confirm`: the link arrived without a token.
pub async fn confirm_missing_token() -> ServiceError {
    ServiceError::validation("No token provided")
}

/// `GET /auth`: returns the authenticated caller's own record.
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<PublicUser> {
    Json(PublicUser::from(current.0))
}
