//! Utility modules shared across the service layer.

pub mod generate_random_string;
pub mod jwt;
pub mod password;

pub use generate_random_string::generate_random_string;
