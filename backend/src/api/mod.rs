//! HTTP surface: error-to-status translation and the user CRUD routes.

pub mod common;
pub mod user;
