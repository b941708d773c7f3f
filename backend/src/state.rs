//! Shared application state handed to every handler.

use crate::config::Config;
use crate::database::Database;
use crate::repositories::{SqliteUserRepository, UserStore};
use crate::services::{MailSender, NoopMailer, SmtpMailer};
use crate::utils::jwt::TokenService;
use crate::utils::password::PasswordHasher;
use anyhow::Result;
use std::sync::Arc;

/// Handles to the store, mailer and token/password primitives. Cheap to
/// clone; one per request via an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub mailer: Arc<dyn MailSender>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the production state: connects the pool, runs migrations,
    /// and wires SMTP delivery when configured (a logging no-op sender
    /// otherwise).
    pub async fn init(config: Config) -> Result<Self> {
        let database = Database::new(&config).await?;
        sqlx::migrate!("./migrations").run(database.pool()).await?;

        let mailer: Arc<dyn MailSender> = match &config.email {
            Some(email_config) => Arc::new(SmtpMailer::new(email_config)?),
            None => {
                tracing::warn!("SMTP_HOST not set, outgoing email is disabled");
                Arc::new(NoopMailer)
            }
        };

        Ok(Self::from_parts(
            Arc::new(SqliteUserRepository::new(database.pool.clone())),
            mailer,
            config,
        ))
    }

    /// Assembles a state from explicit parts. Tests use this to swap in
    /// fake stores or mail senders.
    pub fn from_parts(
        store: Arc<dyn UserStore>,
        mailer: Arc<dyn MailSender>,
        config: Config,
    ) -> Self {
        Self {
            store,
            mailer,
            tokens: Arc::new(TokenService::new(
                &config.jwt_secret,
                config.jwt_expires_in_seconds,
            )),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            config: Arc::new(config),
        }
    }
}
