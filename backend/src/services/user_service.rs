//! User management flows: list, admin-create, update and delete.

use crate::database::models::{
    CreateUserRequest, NewUser, PublicUser, UpdateUserRequest, User, UserPatch,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::email_service::invitation_mail;
use crate::state::AppState;
use crate::utils::generate_random_string;
use uuid::Uuid;
use validator::ValidateEmail;

const TEMP_PASSWORD_LENGTH: usize = 16;
const INVITATION_TOKEN_LENGTH: usize = 32;

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Lists all users. Routing restricts this to admins.
    pub async fn list(&self) -> ServiceResult<Vec<PublicUser>> {
        let users = self.state.store.list().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    /// Creates a user on behalf of an admin. The account starts with a
    /// generated temporary password, which is emailed to the new user
    /// together with a confirmation link.
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<PublicUser> {
        let Some(email) = request.email.filter(|e| !e.is_empty()) else {
            return Err(ServiceError::validation("Missing values"));
        };
        if !email.as_str().validate_email() {
            return Err(ServiceError::validation("Invalid email address"));
        }

        if self.state.store.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::already_exists("User already exists"));
        }

        let temporary_password = generate_random_string(TEMP_PASSWORD_LENGTH);
        let invitation_token = generate_random_string(INVITATION_TOKEN_LENGTH);
        let password_hash = self.state.hasher.hash(&temporary_password)?;

        let user = self
            .state
            .store
            .insert(NewUser {
                id: Uuid::now_v7().to_string(),
                email: email.clone(),
                password_hash,
                avatar: None,
                permission: request.permission.unwrap_or_default(),
                is_verified: request.is_verified.unwrap_or(false),
                invitation_token: Some(invitation_token.clone()),
            })
            .await?;

        self.try_send_invitation(&email, &invitation_token, &temporary_password)
            .await;

        Ok(PublicUser::from(user))
    }

    /// Applies a partial update. Regular users may only change their own
    /// email and password; touching someone else's record, or the
    /// permission / verified flags, requires admin.
    pub async fn update(
        &self,
        actor: &User,
        target_id: &str,
        request: UpdateUserRequest,
    ) -> ServiceResult<PublicUser> {
        let changes_privileged_fields =
            request.permission.is_some() || request.is_verified.is_some();
        if !actor.is_admin() && (actor.id != target_id || changes_privileged_fields) {
            return Err(ServiceError::permission_denied("Action Forbidden"));
        }

        if let Some(email) = &request.email {
            if !email.as_str().validate_email() {
                return Err(ServiceError::validation("Invalid email address"));
            }
            if self
                .state
                .store
                .email_exists_excluding(email, target_id)
                .await?
            {
                return Err(ServiceError::already_exists("Email already exists"));
            }
        }

        let password_hash = match &request.password {
            Some(password) => {
                if password.len() < 6 {
                    return Err(ServiceError::validation(
                        "Password must be at least 6 characters long",
                    ));
                }
                Some(self.state.hasher.hash(password)?)
            }
            None => None,
        };

        let patch = UserPatch {
            email: request.email,
            password_hash,
            permission: request.permission,
            is_verified: request.is_verified,
            ..Default::default()
        };

        let updated = self
            .state
            .store
            .update(target_id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        Ok(PublicUser::from(updated))
    }

    /// Removes a user. Routing restricts this to admins.
    pub async fn delete(&self, target_id: &str) -> ServiceResult<()> {
        let removed = self.state.store.delete(target_id).await?;
        if !removed {
            return Err(ServiceError::not_found("User does not exist"));
        }
        Ok(())
    }

    /// Delivery failures must not fail the creation they follow.
    async fn try_send_invitation(&self, email: &str, token: &str, temporary_password: &str) {
        let mail = invitation_mail(
            &self.state.config.confirm_base_url,
            email,
            token,
            temporary_password,
        );
        if let Err(e) = self.state.mailer.send(mail).await {
            tracing::warn!(to = %email, error = %e, "failed to send invitation email");
        }
    }
}
