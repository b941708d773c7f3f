//! User management endpoints.

pub mod handlers;
pub mod routes;
