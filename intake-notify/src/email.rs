use crate::{
    NotifyError, Templates,
    config::{EmailConfig, SmtpConfig, SmtpTls},
};
use intake_core::ports::{Notification, Notifier};
use lettre::{
    AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::{Level, event};

#[derive(Clone)]
enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Log,
}

/// Sends the notification email for each submission.
#[derive(Clone)]
pub struct EmailNotifier {
    from: Mailbox,
    brand: String,
    templates: Templates,
    transport: Transport,
}

impl EmailNotifier {
    /// Build a notifier from configuration.
    ///
    /// No connection is made here; the SMTP relay is contacted on the first
    /// send.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let transport = match &config.smtp {
            Some(smtp) => Transport::Smtp(smtp_transport(smtp)?),
            None => {
                event!(
                    Level::WARN,
                    "no smtp relay configured, notification emails will only be logged"
                );
                Transport::Log
            }
        };

        Ok(Self {
            from: config.from.parse()?,
            brand: config.brand.clone(),
            templates: Templates::new()?,
            transport,
        })
    }

    /// Whether emails actually leave the process.
    pub fn is_delivering(&self) -> bool {
        matches!(self.transport, Transport::Smtp(_))
    }
}

fn smtp_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let (builder, port) = match config.tls {
        SmtpTls::Starttls => (
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?,
            587,
        ),
        SmtpTls::Implicit => (
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            465,
        ),
        SmtpTls::None => (
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            25,
        ),
    };

    let mut builder = builder
        .port(config.port.unwrap_or(port))
        .timeout(Some(config.timeout));

    if let Some(username) = &config.username {
        let password = config.password.clone().unwrap_or_default();
        builder = builder.credentials(Credentials::new(username.clone(), password));
    }

    Ok(builder.build())
}

impl Notifier for EmailNotifier {
    type Error = NotifyError;

    async fn send(&self, notification: &Notification<'_>) -> Result<(), Self::Error> {
        let email = self.templates.email(
            &self.brand,
            notification.subject_template,
            notification.record,
        )?;

        match &self.transport {
            Transport::Smtp(transport) => {
                let message = Message::builder()
                    .from(self.from.clone())
                    .to(notification.recipient.parse()?)
                    .subject(email.subject)
                    .multipart(MultiPart::alternative_plain_html(email.plain, email.html))?;

                let response = transport.send(message).await?;
                event!(
                    Level::INFO,
                    to = notification.recipient,
                    code = response.code().to_string(),
                    "notification email sent"
                );
            }
            Transport::Log => {
                // still validate the address so misconfiguration shows up early
                let _: Mailbox = notification.recipient.parse()?;
                event!(
                    Level::INFO,
                    to = notification.recipient,
                    subject = email.subject,
                    body = email.plain,
                    "notification email (not sent)"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::models::{SubmissionPayload, SubmissionRecord};
    use time::macros::{datetime, offset};

    fn record() -> SubmissionRecord {
        SubmissionRecord::from_payload(
            SubmissionPayload::default(),
            datetime!(2024-05-01 01:30 UTC),
            offset!(+9),
        )
    }

    #[tokio::test]
    async fn log_transport_accepts_valid_recipient() {
        let notifier = EmailNotifier::new(&EmailConfig::default()).unwrap();
        assert!(!notifier.is_delivering());

        let record = record();
        let notification = Notification {
            recipient: "desk@example.kr",
            subject_template: "subject",
            record: &record,
        };
        notifier.send(&notification).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_recipient_is_an_error() {
        let notifier = EmailNotifier::new(&EmailConfig::default()).unwrap();
        let record = record();
        let notification = Notification {
            recipient: "not an address",
            subject_template: "subject",
            record: &record,
        };
        assert!(matches!(
            notifier.send(&notification).await,
            Err(NotifyError::Address(_))
        ));
    }

    #[test]
    fn invalid_sender_is_rejected_at_construction() {
        let config = EmailConfig {
            from: "nobody".into(),
            ..Default::default()
        };
        assert!(matches!(
            EmailNotifier::new(&config),
            Err(NotifyError::Address(_))
        ));
    }

    #[tokio::test]
    async fn smtp_transport_is_built_lazily() {
        let config = EmailConfig {
            smtp: Some(SmtpConfig {
                host: "smtp.example.kr".into(),
                port: None,
                username: Some("desk".into()),
                password: Some("secret".into()),
                tls: SmtpTls::Starttls,
                timeout: std::time::Duration::from_secs(1),
            }),
            ..Default::default()
        };
        assert!(EmailNotifier::new(&config).unwrap().is_delivering());
    }
}
