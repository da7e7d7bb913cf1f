use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// A message ready to hand to a transport. Addresses are plain strings
/// here; the transport parses them and rejects malformed ones.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, from: &str, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Transport used when mail is disabled in config. Logs the message
/// instead of sending it so local development needs no SMTP account.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, from: &str, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            from = %from,
            to = %email.to,
            subject = %email.subject,
            "Mail disabled; logging outbound message instead of sending"
        );
        tracing::debug!(body = %email.body, "Outbound message body");
        Ok(())
    }
}
