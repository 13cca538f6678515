//! Configuration types for email and short-message delivery.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration of the email notifier.
///
/// With no `smtp` section the rendered email is only written to the log,
/// which is convenient during development.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Sender mailbox, e.g. `Consultation Desk <desk@example.kr>`
    #[serde(default = "default_from")]
    pub from: String,

    /// Brand line shown under the email title
    #[serde(default = "default_brand")]
    pub brand: String,

    /// SMTP relay; if absent, emails are logged instead of sent
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

fn default_from() -> String {
    "Consultation Desk <noreply@localhost>".to_owned()
}

fn default_brand() -> String {
    "화명 현대 공부방 x 독서테라피 리드인".to_owned()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            brand: default_brand(),
            smtp: None,
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Plain connection upgraded with STARTTLS (port 587)
    #[default]
    Starttls,
    /// TLS from the first byte (port 465)
    Implicit,
    /// No encryption at all; only for local relays
    None,
}

/// Connection settings for an SMTP relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,

    /// Relay port; defaults to the standard port for `tls`
    #[serde(default)]
    pub port: Option<u16>,

    /// Login user name
    #[serde(default)]
    pub username: Option<String>,

    /// Login password
    #[serde(default)]
    pub password: Option<String>,

    /// Connection security
    #[serde(default)]
    pub tls: SmtpTls,

    /// Time allowed for each SMTP command
    #[serde(default = "default_smtp_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_smtp_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Configuration of the SMS gateway.
///
/// # Examples
///
/// ```
/// use intake_notify::config::SmsConfig;
///
/// let config = SmsConfig::default();
/// assert!(!config.enabled);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Whether short messages are sent at all
    #[serde(default)]
    pub enabled: bool,

    /// Endpoint that accepts the JSON message
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Key sent as `apiKey`
    #[serde(default)]
    pub api_key: String,

    /// Number sent as `sender`
    #[serde(default)]
    pub sender_number: String,

    /// Number sent as `receiver`
    #[serde(default)]
    pub admin_phone: String,

    /// Bracketed prefix of every message
    #[serde(default = "default_sms_brand")]
    pub brand: String,

    /// Request timeout
    #[serde(default = "default_sms_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_api_url() -> String {
    "https://api.your-sms-provider.com/send".to_owned()
}

fn default_sms_brand() -> String {
    "화명현대공부방".to_owned()
}

fn default_sms_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_api_url(),
            api_key: String::new(),
            sender_number: String::new(),
            admin_phone: String::new(),
            brand: default_sms_brand(),
            timeout: default_sms_timeout(),
        }
    }
}
