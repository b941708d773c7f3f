//! Central module for application-wide configuration settings.
//!
//! All configuration is read from environment variables exactly once at
//! process start; there is no hot reload. SMTP settings are optional:
//! when absent, outgoing mail is disabled and a no-op sender is wired
//! in instead.

use anyhow::{Context, Result};
use std::env;

/// Session tokens default to a 14-day lifetime.
const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 14 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    /// Base URL used to build confirmation links sent by mail.
    pub confirm_base_url: String,
    /// Frontend URL the email-confirmation endpoint redirects to.
    pub frontend_url: String,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_name: String,
    pub from_email: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| DEFAULT_JWT_EXPIRES_IN_SECS.to_string())
            .parse::<i64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let confirm_base_url =
            env::var("CONFIRM_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
            confirm_base_url,
            frontend_url,
            email: EmailConfig::from_env()?,
        })
    }
}

impl EmailConfig {
    /// Reads the optional SMTP settings. Returns `None` when `SMTP_HOST`
    /// is unset, in which case outgoing mail is disabled.
    fn from_env() -> Result<Option<Self>> {
        let Ok(smtp_host) = env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid number")?;

        Ok(Some(EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "No Reply".to_string()),
            from_email: env::var("MAIL_FROM_EMAIL")
                .unwrap_or_else(|_| "no_reply@example.com".to_string()),
        }))
    }
}
