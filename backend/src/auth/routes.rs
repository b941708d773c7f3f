//! Route table for the authentication endpoints.

use crate::auth::handlers;
use crate::auth::middleware::require_auth;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/confirm", get(handlers::confirm_missing_token))
        .route("/confirm/{token}", get(handlers::confirm_email))
        .route("/auth", get(handlers::me).route_layer(from_fn(require_auth)))
}
