//! Outbound email
//!
//! Email is strictly fire-and-forget: a failed send is logged and
//! discarded, never propagated to the request that triggered it. The
//! trait keeps the transport swappable; the default implementation
//! writes to the log, which is also what test and development
//! environments run with.

use async_trait::async_trait;

/// Errors from an email transport
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email transport error: {0}")]
    Transport(String),
}

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Mailer that writes messages to the tracing log.
#[derive(Debug, Clone, Default)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Create a log mailer with the configured from-address
    #[must_use]
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(
            from = %self.from_address,
            to = %to,
            subject = %subject,
            body_len = body.len(),
            "Outbound email"
        );
        Ok(())
    }
}

/// Mailer that silently drops everything (outbound email disabled).
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
        Ok(())
    }
}

/// Spawn a send and log the outcome; the caller never waits.
pub(crate) fn send_detached(
    mailer: std::sync::Arc<dyn Mailer>,
    to: String,
    subject: String,
    body: String,
) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            tracing::warn!(to = %to, error = %e, "Email send failed (dropped)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer::new("no-reply@eventlink.example");
        assert!(mailer.send("a@b.c", "Hello", "World").await.is_ok());
    }
}
