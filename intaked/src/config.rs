//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use intake_axum::config::AxumConfig;
use intake_core::config::FormConfig;
use intake_notify::config::{EmailConfig, SmsConfig};
use intake_sqlite::config::SqliteConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, CORS)
    #[serde(default)]
    pub server: AxumConfig,

    /// Database configuration (file location, busy timeout)
    #[serde(default)]
    pub database: SqliteConfig,

    /// Submission handling (recipient, sheet name, subject, timezone)
    #[serde(default)]
    pub form: FormConfig,

    /// Email sender and SMTP relay
    #[serde(default)]
    pub email: EmailConfig,

    /// Short-message gateway, disabled by default
    #[serde(default)]
    pub sms: SmsConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Send notifications to the front desk
    /// export APP_FORM__RECIPIENT_EMAIL="desk@example.com"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Relay through an SMTP server
    /// export APP_EMAIL__SMTP__HOST="smtp.example.com"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::load_from(cli.config.as_deref())
    }

    /// Load configuration with an explicit (optional) config file.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps APP_FORM__RECIPIENT_EMAIL to form.recipient_email
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{path::PathBuf, time::Duration};

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("intaked-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_survive_the_round_trip() {
        let config = AppConfig::load_from(None).unwrap();
        let defaults = AppConfig::default();

        assert_eq!(config.form, defaults.form);
        assert_eq!(config.server.bind_address, defaults.server.bind_address);
        assert!(config.email.smtp.is_none());
        assert!(!config.sms.enabled);
        assert_eq!(config.database.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn file_overrides_defaults() {
        let path = write_config(
            "override",
            r#"
            [form]
            recipient_email = "desk@example.com"
            notifications_enabled = false
            utc_offset = "+00:00"

            [email.smtp]
            host = "smtp.example.com"
            tls = "implicit"
            timeout = "30s"
            "#,
        );

        let config = AppConfig::load_from(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.form.recipient_email, "desk@example.com");
        assert!(!config.form.notifications_enabled);
        assert_eq!(config.form.utc_offset, time::UtcOffset::UTC);
        assert_eq!(config.form.store_name, "Consultations");

        let smtp = config.email.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.tls, intake_notify::config::SmtpTls::Implicit);
        assert_eq!(smtp.timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("intaked-does-not-exist.toml");
        assert!(AppConfig::load_from(Some(&path)).is_err());
    }
}
