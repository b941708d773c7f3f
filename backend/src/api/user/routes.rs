//! Route table for user CRUD, with the access policy declared here
//! rather than inside the handlers.
//!
//! Layer ordering: `route_layer` wraps outermost, so `require_auth`
//! always runs before any `require_admin` attached to an individual
//! method.

use crate::api::user::handlers;
use crate::auth::middleware::{require_admin, require_auth};
use axum::Router;
use axum::handler::Handler;
use axum::middleware::from_fn;
use axum::routing::{get, put};

pub fn user_router() -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users)
                .post(handlers::create_user)
                .layer(from_fn(require_admin)),
        )
        .route(
            "/users/{id}",
            put(handlers::update_user)
                .delete(handlers::delete_user.layer(from_fn(require_admin))),
        )
        .route_layer(from_fn(require_auth))
}
