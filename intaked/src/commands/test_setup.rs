use intake_core::{
    SubmissionHandler,
    config::{FormConfig, PLACEHOLDER_RECIPIENT},
    ports::{Notifier, RecordStore},
    try_handle_submission,
};
use serde_json::json;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{Level, event};

/// What [`test_setup`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSetupReport {
    /// The row the test record landed in
    pub row: u64,
    /// Whether a test email was sent
    pub emailed: bool,
}

/// Push a fixed test record through the regular submission path.
///
/// The test email is only sent when notifications are enabled and a real
/// recipient has been configured; otherwise the record is appended and the
/// email step is skipped.
pub async fn test_setup<S, N>(
    config: &FormConfig,
    store: S,
    notifier: N,
) -> anyhow::Result<TestSetupReport>
where
    S: RecordStore + Sync,
    N: Notifier + Sync,
{
    let emailed =
        config.notifications_enabled && config.recipient_email != PLACEHOLDER_RECIPIENT;

    let config = FormConfig {
        notifications_enabled: emailed,
        ..config.clone()
    };

    let payload = json!({
        "name": "테스트",
        "grade": "초등 저학년",
        "phone": "010-1234-5678",
        "datetime": OffsetDateTime::now_utc().format(&Rfc3339)?,
        "message": "테스트 메시지입니다.",
    });

    let recipient = config.recipient_email.clone();
    let handler = SubmissionHandler::new(config, store, notifier);
    let row = try_handle_submission(&handler, &serde_json::to_vec(&payload)?).await?;

    event!(Level::INFO, row, "test record appended");
    if emailed {
        event!(Level::INFO, recipient, "test email sent");
    } else {
        event!(
            Level::INFO,
            "email test skipped, set form.recipient_email and enable notifications to send one"
        );
    }

    Ok(TestSetupReport { row, emailed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::testing::{MemoryStore, RecordingNotifier};
    use rstest::*;

    #[rstest]
    #[case::placeholder_recipient(PLACEHOLDER_RECIPIENT, true, false)]
    #[case::notifications_disabled("desk@example.com", false, false)]
    #[case::configured("desk@example.com", true, true)]
    #[tokio::test]
    async fn email_only_goes_to_a_real_recipient(
        #[case] recipient: &str,
        #[case] enabled: bool,
        #[case] emailed: bool,
    ) {
        let config = FormConfig {
            recipient_email: recipient.to_owned(),
            notifications_enabled: enabled,
            ..Default::default()
        };
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();

        let report = test_setup(&config, store.clone(), notifier.clone())
            .await
            .unwrap();

        assert_eq!(report, TestSetupReport { row: 2, emailed });
        assert_eq!(notifier.sent().len(), usize::from(emailed));

        let rows = store.rows(&config.store_name).await.unwrap().unwrap();
        assert_eq!(
            &rows[1].cells[1..4],
            &["테스트", "초등 저학년", "010-1234-5678"]
        );
        assert_eq!(rows[1].cells[5], "테스트 메시지입니다.");
    }

    #[tokio::test]
    async fn store_failures_are_reported() {
        let store = MemoryStore::default();
        store.set_failing(true);

        let result = test_setup(&FormConfig::default(), store, RecordingNotifier::default()).await;
        assert!(result.is_err());
    }
}
