//! Request guards.
//!
//! `require_auth` resolves the bearer token and inserts the caller into
//! request extensions; `require_admin` layers a role check on top of
//! it. Both speak `ServiceError`, translated to status codes at the API
//! boundary.

use crate::auth::models::CurrentUser;
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{Extension, extract::Request, middleware::Next, response::Response};

/// Rejects requests without a valid bearer session and stores the
/// resolved `CurrentUser` for downstream handlers.
pub async fn require_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ServiceError::unauthorized("No authorization header"))?;

    let mut parts = header.split_whitespace();
    let token = match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => token,
        _ => return Err(ServiceError::unauthorized("Bearer keyword is missing.")),
    };

    let user = AuthService::new(&state)
        .resolve_session(token)
        .await
        .ok_or_else(|| ServiceError::unauthorized("Unauthorized"))?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Rejects non-admin callers. Must run after `require_auth`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ServiceError> {
    let current = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ServiceError::unauthorized("Unauthorized"))?;

    if !current.0.is_admin() {
        return Err(ServiceError::permission_denied("Action Forbidden"));
    }

    Ok(next.run(request).await)
}
