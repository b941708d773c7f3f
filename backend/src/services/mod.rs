//! Business logic services.
//!
//! Services own the rules of each flow and speak `ServiceError`
//! throughout; the HTTP layer only translates those errors to status
//! codes at the boundary.

pub mod email_service;
pub mod user_service;

pub use email_service::{Mail, MailSender, NoopMailer, SmtpMailer};
pub use user_service::UserService;
