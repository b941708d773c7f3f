//! Random alphanumeric string generation, used for invitation tokens
//! and server-generated temporary passwords.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generates a random alphanumeric string of the given length.
pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
