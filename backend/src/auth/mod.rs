//! Authentication: registration, email confirmation, login and the
//! request guards that enforce session and role checks.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

pub use models::CurrentUser;
pub use service::AuthService;
