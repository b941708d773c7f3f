//! Authentication flows: register, confirm, login, session resolution.

use super::models::{LoginRequest, RegisterRequest};
use crate::database::models::{NewUser, PublicUser, RegisteredUser, User, UserPatch};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::email_service::confirmation_mail;
use crate::state::AppState;
use crate::utils::generate_random_string;
use uuid::Uuid;
use validator::ValidateEmail;

const MIN_PASSWORD_LENGTH: usize = 6;
const INVITATION_TOKEN_LENGTH: usize = 32;

pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers a new, unverified account and sends the confirmation
    /// email. The record and its invitation token are written in one
    /// insert.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisteredUser> {
        let (Some(email), Some(password)) = (
            request.email.filter(|e| !e.is_empty()),
            request.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(ServiceError::validation("Missing values"));
        };

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(
                "Password must be at least 6 characters long",
            ));
        }
        if !email.as_str().validate_email() {
            return Err(ServiceError::validation("Invalid email address"));
        }

        if self.state.store.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::already_exists("Email already exists"));
        }

        let invitation_token = generate_random_string(INVITATION_TOKEN_LENGTH);
        let password_hash = self.state.hasher.hash(&password)?;

        let user = self
            .state
            .store
            .insert(NewUser {
                id: Uuid::now_v7().to_string(),
                email: email.clone(),
                password_hash,
                avatar: None,
                permission: request.permission.unwrap_or_default(),
                is_verified: false,
                invitation_token: Some(invitation_token.clone()),
            })
            .await?;

        self.try_send_confirmation(&email, &invitation_token).await;

        Ok(RegisteredUser::from(user))
    }

    /// Consumes an invitation token: marks the account verified, clears
    /// the token, and returns a session token for immediate sign-in.
    pub async fn confirm_email(&self, invitation_token: &str) -> ServiceResult<String> {
        if invitation_token.is_empty() {
            return Err(ServiceError::validation("No token provided"));
        }

        let user = self
            .state
            .store
            .find_by_invitation_token(invitation_token)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid token provided"))?;

        let session_token = self.state.tokens.issue(&user.id)?;

        self.state
            .store
            .update(
                &user.id,
                UserPatch {
                    is_verified: Some(true),
                    session_token: Some(session_token.clone()),
                    clear_invitation_token: true,
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid token provided"))?;

        Ok(session_token)
    }

    /// Validates credentials and rotates the stored session token. The
    /// same generic message covers unknown email and wrong password so
    /// the response does not reveal which one failed.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<PublicUser> {
        let (Some(email), Some(password)) = (
            request.email.filter(|e| !e.is_empty()),
            request.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(ServiceError::validation("Missing values"));
        };

        let Some(user) = self.state.store.find_by_email(&email).await? else {
            return Err(ServiceError::validation("Invalid email/password combination"));
        };

        if !user.is_verified {
            return Err(ServiceError::validation("Unverified user"));
        }

        if !self.state.hasher.verify(&password, &user.password_hash)? {
            return Err(ServiceError::validation("Invalid email/password combination"));
        }

        let session_token = self.state.tokens.issue(&user.id)?;
        let updated = self
            .state
            .store
            .update(
                &user.id,
                UserPatch {
                    session_token: Some(session_token),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid email/password combination"))?;

        Ok(PublicUser::from(updated))
    }

    /// Resolves a bearer token to its user. Returns `None` for any
    /// failure: bad signature, expiry, a subject that no longer exists,
    /// or a store error (logged, never raised to the caller).
    pub async fn resolve_session(&self, token: &str) -> Option<User> {
        let user_id = self.state.tokens.verify(token)?;
        match self.state.store.find_by_id(&user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed");
                None
            }
        }
    }

    /// Delivery failures must not fail the registration they follow.
    async fn try_send_confirmation(&self, email: &str, token: &str) {
        let mail = confirmation_mail(&self.state.config.confirm_base_url, email, token);
        if let Err(e) = self.state.mailer.send(mail).await {
            tracing::warn!(to = %email, error = %e, "failed to send confirmation email");
        }
    }
}
