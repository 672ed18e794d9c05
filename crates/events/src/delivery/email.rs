//! Submission notices over SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. If `SMTP_HOST`
//! or `ADMIN_EMAIL` is unset, [`EmailConfig::from_env`] returns `None` and
//! the server runs without notifications.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::notice::SubmissionNotice;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@classhopper.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Moderator inbox that receives every notice.
    pub admin_email: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                      |
    /// |-----------------|----------|------------------------------|
    /// | `SMTP_HOST`     | yes      |                              |
    /// | `ADMIN_EMAIL`   | yes      |                              |
    /// | `SMTP_PORT`     | no       | `587`                        |
    /// | `SMTP_FROM`     | no       | `SMTP_USER`, else `noreply@classhopper.local` |
    /// | `SMTP_USER`     | no       |                              |
    /// | `SMTP_PASSWORD` | no       |                              |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let admin_email = std::env::var("ADMIN_EMAIL").ok()?;
        let smtp_user = std::env::var("SMTP_USER").ok();
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .ok()
                .or_else(|| smtp_user.clone())
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user,
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_email,
        })
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends submission notices to the moderator inbox.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Assemble the MIME message for a notice without sending it.
    pub fn build_message(&self, notice: &SubmissionNotice) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.admin_email.parse()?)
            .subject(notice.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(notice.body())
            .map_err(|e| EmailError::Build(e.to_string()))
    }

    pub async fn deliver(&self, notice: &SubmissionNotice) -> Result<(), EmailError> {
        let email = self.build_message(notice)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            submission_id = notice.submission_id,
            submission_type = notice.submission_type.as_str(),
            "Submission notice sent",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use classhopper_core::registration::TopicSuggestion;

    fn config(admin_email: &str) -> EmailConfig {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            smtp_user: None,
            smtp_password: None,
            admin_email: admin_email.to_string(),
        }
    }

    fn notice() -> SubmissionNotice {
        let topic = TopicSuggestion {
            title: "Rust study group".to_string(),
            body: "Weekly meetups".to_string(),
            category_id: "general".to_string(),
            tag_ids: vec![],
        };
        SubmissionNotice::for_topic(1, Utc::now(), &topic)
    }

    #[test]
    fn message_is_addressed_to_admin() {
        let delivery = EmailDelivery::new(config("mods@example.com"));
        let message = delivery.build_message(&notice()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: mods@example.com"));
        assert!(raw.contains("Subject: [Classhopper] New topic suggestion"));
    }

    #[test]
    fn invalid_admin_address_is_reported() {
        let delivery = EmailDelivery::new(config("not-an-email"));
        let err = delivery.build_message(&notice()).unwrap_err();
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
