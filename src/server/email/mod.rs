//! Outgoing email.
//!
//! Services send mail through `EmailSender`. The bundled `LogEmailSender` writes each
//! message to the log instead of talking to an SMTP relay, which is enough for local
//! deployments and keeps the transport swappable.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Invalid recipient address '{0}'")]
    InvalidRecipient(String),

    #[error("Email transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// Sender that records messages in the application log.
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !message.to.contains('@') {
            return Err(EmailError::InvalidRecipient(message.to));
        }

        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "email sent"
        );
        tracing::debug!(body = %message.body, "email body");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: "Hello".to_string(),
            body: "Body".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_to_valid_address() {
        let sender = LogEmailSender::new("no-reply@forja.local".to_string());

        assert!(sender.send(message("player@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_address_without_at_sign() {
        let sender = LogEmailSender::new("no-reply@forja.local".to_string());

        let result = sender.send(message("player")).await;

        assert!(matches!(result, Err(EmailError::InvalidRecipient(_))));
    }
}
