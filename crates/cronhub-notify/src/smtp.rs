//! SMTP notifier over lettre's async transport.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use cronhub_core::config::notify::NotifyConfig;
use cronhub_core::result::AppResult;
use cronhub_core::traits::notify::Notifier;
use cronhub_core::types::report::FailureReport;
use cronhub_core::AppError;

use crate::message;

/// Delivers failure reports by email.
///
/// The transport pools connections internally; the actual connection is
/// made lazily on the first send.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    subject_prefix: String,
}

impl SmtpNotifier {
    /// Build a notifier from the notification configuration.
    pub fn new(config: &NotifyConfig) -> AppResult<Self> {
        let from: Mailbox = config.from_email.parse().map_err(|e| {
            AppError::configuration(format!("invalid from_email '{}': {e}", config.from_email))
        })?;
        let recipients = config
            .recipients
            .iter()
            .map(|addr| {
                addr.parse().map_err(|e| {
                    AppError::configuration(format!("invalid recipient '{addr}': {e}"))
                })
            })
            .collect::<AppResult<Vec<Mailbox>>>()?;
        if recipients.is_empty() {
            return Err(AppError::configuration(
                "failure notifications require at least one recipient",
            ));
        }

        let builder = if config.smtp.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.host)
                .map_err(|e| AppError::notification(format!("smtp relay setup failed: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp.host)
        };
        let mut builder = builder.port(config.smtp.port);
        if let (Some(username), Some(password)) =
            (config.smtp.username.clone(), config.smtp.password.clone())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        debug!(
            host = %config.smtp.host,
            port = config.smtp.port,
            use_tls = config.smtp.use_tls,
            "SMTP notifier initialized"
        );
        Ok(Self {
            transport: builder.build(),
            from,
            recipients,
            subject_prefix: config.subject_prefix.clone(),
        })
    }

    /// Verify the SMTP server is reachable.
    pub async fn health_check(&self) -> AppResult<()> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| AppError::notification(format!("smtp connection test failed: {e}")))?;
        Ok(())
    }
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, report: &FailureReport) -> AppResult<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message::subject(&self.subject_prefix, report));
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        let email = builder
            .body(message::body(report))
            .map_err(|e| AppError::notification(format!("failed to build message: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::notification(format!("failed to send notification: {e}")))?;
        info!(
            code = %report.code,
            failures = report.records.len(),
            "Sent failure notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> NotifyConfig {
        NotifyConfig {
            from_email: "cron@example.com".to_string(),
            recipients: vec!["ops@example.com".to_string()],
            ..NotifyConfig::default()
        }
    }

    #[test]
    fn test_builds_from_valid_config() {
        assert!(SmtpNotifier::new(&base_config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_from_address() {
        let config = NotifyConfig {
            from_email: "not an address".to_string(),
            ..base_config()
        };
        assert!(SmtpNotifier::new(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_recipients() {
        let config = NotifyConfig {
            recipients: Vec::new(),
            ..base_config()
        };
        assert!(SmtpNotifier::new(&config).is_err());
    }
}
