//! Outgoing email delivery.

#[cfg(test)]
#[path = "mailer_test.rs"]
mod mailer_test;

use std::sync::Arc;

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use crate::config::NotifyConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Pick the mailer for `config`: Resend when an API key is set, otherwise
/// one that only logs.
pub fn from_config(config: &NotifyConfig) -> Arc<dyn Mailer> {
    match &config.resend_api_key {
        Some(key) => {
            tracing::info!(from = %config.from, "email delivery via resend");
            Arc::new(ResendMailer::new(key, &config.from))
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set; notifications will be logged, not sent");
            Arc::new(LogMailer)
        }
    }
}

pub struct ResendMailer {
    client: Resend,
    from: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: &str) -> Self {
        Self { client: Resend::new(api_key), from: from.to_owned() }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let options = CreateEmailBaseOptions::new(&self.from, [email.to.as_str()], &email.subject).with_html(&email.html);
        self.client
            .emails
            .send(options)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        tracing::debug!(to = %email.to, "email accepted by resend");
        Ok(())
    }
}

/// Development mailer: logs the email instead of sending it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, bytes = email.html.len(), "email (log only)");
        Ok(())
    }
}
