//! Outgoing email.
//!
//! `MailSender` abstracts over delivery so tests can capture outgoing
//! mail instead of hitting SMTP. Delivery failures never abort the flow
//! that triggered them; callers log and continue.

use crate::config::EmailConfig;
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A fully composed outgoing message.
#[derive(Debug, Clone)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: Mail) -> ServiceResult<()>;
}

/// SMTP delivery via lettre.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> ServiceResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ServiceError::internal(format!("Invalid SMTP host: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: format!("{} <{}>", config.from_name, config.from_email),
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, mail: Mail) -> ServiceResult<()> {
        let message = Message::builder()
            .from(self
                .from
                .parse()
                .map_err(|e| ServiceError::internal(format!("Invalid from address: {e}")))?)
            .to(mail
                .to
                .parse()
                .map_err(|e| ServiceError::internal(format!("Invalid recipient address: {e}")))?)
            .subject(&mail.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(mail.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(mail.html),
                    ),
            )
            .map_err(|e| ServiceError::internal(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to send email: {e}")))?;

        tracing::info!(to = %mail.to, subject = %mail.subject, "email sent");
        Ok(())
    }
}

/// Drop-in sender used when SMTP is not configured. Logs instead of
/// delivering.
pub struct NoopMailer;

#[async_trait]
impl MailSender for NoopMailer {
    async fn send(&self, mail: Mail) -> ServiceResult<()> {
        tracing::warn!(
            to = %mail.to,
            subject = %mail.subject,
            "SMTP not configured, dropping outgoing email"
        );
        Ok(())
    }
}

/// Builds the account-confirmation email sent after self-registration.
pub fn confirmation_mail(base_url: &str, email: &str, invitation_token: &str) -> Mail {
    let link = format!("{base_url}/confirm/{invitation_token}");
    Mail {
        to: email.to_owned(),
        subject: "Confirm your account".to_owned(),
        html: format!(
            "<p>Welcome!</p>\
             <p>Please confirm your account by clicking \
             <a href=\"{link}\">this link</a>.</p>"
        ),
        text: format!("Welcome! Please confirm your account: {link}"),
    }
}

/// Builds the invitation email for an admin-created account, carrying
/// both the confirmation link and the generated temporary password.
pub fn invitation_mail(
    base_url: &str,
    email: &str,
    invitation_token: &str,
    temporary_password: &str,
) -> Mail {
    let link = format!("{base_url}/confirm/{invitation_token}");
    Mail {
        to: email.to_owned(),
        subject: "You have been invited".to_owned(),
        html: format!(
            "<p>An account has been created for you.</p>\
             <p>Your temporary password: {temporary_password}</p>\
             <p>Please confirm your account by clicking \
             <a href=\"{link}\">this link</a>, then sign in and change \
             your password.</p>"
        ),
        text: format!(
            "An account has been created for you. \
             Your temporary password: {temporary_password} \
             Confirm your account: {link}"
        ),
    }
}
