//! Failure notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for the failed-runs notifier job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Minimum number of unreported failures before a notification fires.
    #[serde(default = "default_min_failures")]
    pub min_failures: usize,
    /// Sender address for failure notifications.
    #[serde(default)]
    pub from_email: String,
    /// Recipient addresses for failure notifications.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Prefix prepended to the notification subject line.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// SMTP transport settings.
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            min_failures: default_min_failures(),
            from_email: String::new(),
            recipients: Vec::new(),
            subject_prefix: default_subject_prefix(),
            smtp: SmtpConfig::default(),
        }
    }
}

/// SMTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Optional username for SMTP authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional password for SMTP authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether to use STARTTLS for the connection.
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            use_tls: default_use_tls(),
        }
    }
}

fn default_min_failures() -> usize {
    10
}

fn default_subject_prefix() -> String {
    "[Cron Failure] ".to_string()
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}
