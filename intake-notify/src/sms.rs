use crate::{NotifyError, Templates, config::SmsConfig};
use intake_core::{models::SubmissionRecord, ports::Messenger};
use serde::Serialize;
use tracing::{Level, event};

/// The JSON body accepted by the SMS gateway.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SmsRequest<'a> {
    api_key: &'a str,
    sender: &'a str,
    receiver: &'a str,
    message: String,
}

/// Posts a short message about each submission to an SMS gateway.
#[derive(Clone)]
pub struct SmsMessenger {
    client: reqwest::Client,
    config: SmsConfig,
    templates: Templates,
}

impl SmsMessenger {
    /// Build a messenger from configuration.
    ///
    /// Returns `Ok(None)` when short messages are disabled.
    pub fn new(config: &SmsConfig) -> Result<Option<Self>, NotifyError> {
        if !config.enabled {
            return Ok(None);
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Some(Self {
            client,
            config: config.clone(),
            templates: Templates::new()?,
        }))
    }
}

impl Messenger for SmsMessenger {
    type Error = NotifyError;

    async fn dispatch(&self, record: &SubmissionRecord) -> Result<(), Self::Error> {
        let request = SmsRequest {
            api_key: &self.config.api_key,
            sender: &self.config.sender_number,
            receiver: &self.config.admin_phone,
            message: self.templates.sms(&self.config.brand, record)?,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        event!(Level::INFO, response = body, "short message sent");
        Ok(())
    }
}
