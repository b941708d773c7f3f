//! Persistence layer.
//!
//! Repositories expose narrow, interface-typed handles over the backing
//! store so flows can be constructed against `Arc<dyn UserStore>` and
//! tests can swap the implementation.

pub mod user_repository;

pub use user_repository::{SqliteUserRepository, UserStore};
