//! Account management backend: registration with email confirmation,
//! credential login with JWT sessions, and role-gated user CRUD.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

use axum::http::Request;
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Assembles the full application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes::auth_router())
        .merge(api::user::routes::user_router())
        .route("/ping", get(|| async { "ok" }))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(|response: &Response, latency: Duration, _span: &tracing::Span| {
                    tracing::info!(status = %response.status(), ?latency, "response");
                }),
        )
}

pub use state::AppState;
