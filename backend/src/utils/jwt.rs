//! JWT session token creation and validation.

use crate::errors::{ServiceError, ServiceResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token. `sub` holds the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Issues and verifies HS256 session tokens with a fixed lifetime.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_seconds: i64,
}

impl TokenService {
    pub fn new(secret: &str, expires_in_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_seconds,
        }
    }

    /// Issues a signed token whose subject is the given user id.
    pub fn issue(&self, user_id: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.expires_in_seconds);

        let claims = Claims {
            sub: user_id.to_owned(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Failed to sign token: {e}")))
    }

    /// Verifies a token and returns the user id it was issued for.
    /// Any failure (bad signature, expiry, malformed input) yields
    /// `None`; callers translate that into an authorization error.
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let tokens = TokenService::new("test-secret", 3600);
        let token = tokens.issue("user-42").unwrap();
        assert_eq!(tokens.verify(&token).as_deref(), Some("user-42"));
    }

    #[test]
    fn expired_token_is_rejected() {
        // beyond the default 60s validation leeway
        let tokens = TokenService::new("test-secret", -120);
        let token = tokens.issue("user-42").unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = TokenService::new("secret-a", 3600);
        let verifier = TokenService::new("secret-b", 3600);
        let token = issuer.issue("user-42").unwrap();
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = TokenService::new("test-secret", 3600);
        let mut token = tokens.issue("user-42").unwrap();
        token.pop();
        token.push('A');
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn garbage_input_is_rejected() {
        let tokens = TokenService::new("test-secret", 3600);
        assert!(tokens.verify("not-a-jwt").is_none());
        assert!(tokens.verify("").is_none());
    }
}
