use crate::{
    config::FormConfig,
    models::{Ack, HealthStatus, Row, SubmissionPayload, SubmissionRecord},
    ports::{Application, Messenger, Notification, Notifier, RecordStore},
};
use std::convert::Infallible;
use tracing::{Level, event};

/// Why a submission was not fully processed.
///
/// All variants collapse into the same failure acknowledgement; the variant
/// only matters for logging and for the `row` hint.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError<StoreError, NotifyError> {
    /// The request body is not valid JSON
    #[error("{0}")]
    MalformedInput(serde_json::Error),

    /// The sheet could not be created or appended to
    #[error("{0}")]
    StoreWriteFailure(StoreError),

    /// The record was appended at `row`, but the notification failed
    #[error("{cause}")]
    NotificationFailure {
        /// Index of the row that was already appended
        row: u64,
        /// The delivery error
        cause: NotifyError,
    },
}

impl<S, N> HandlerError<S, N> {
    /// The row that was appended before the failure, if any.
    pub fn row(&self) -> Option<u64> {
        match self {
            Self::NotificationFailure { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// The error produced by [`try_handle_submission`] for an application `A`.
pub type SubmissionError<A> = HandlerError<
    <<A as Application>::Store as RecordStore>::Error,
    <<A as Application>::Notifier as Notifier>::Error,
>;

/// Process a raw submission body.
///
/// Decodes the payload, makes sure the configured sheet exists (creating its
/// header row on first use), appends the normalized record, and sends the
/// email notification if enabled. A configured messenger is tried last; its
/// failures are logged and otherwise ignored.
///
/// Nothing is rolled back: a notification failure is reported after the row
/// has been written.
pub async fn try_handle_submission<A: Application>(
    app: &A,
    raw: &[u8],
) -> Result<u64, SubmissionError<A>> {
    let payload = SubmissionPayload::decode(raw).map_err(HandlerError::MalformedInput)?;

    let config = app.config();
    let store = app.store();

    let created = store
        .ensure_sheet(&config.store_name, &Row::header())
        .await
        .map_err(HandlerError::StoreWriteFailure)?;
    if created {
        event!(Level::INFO, sheet = config.store_name.as_str(), "created sheet");
    }

    let record = SubmissionRecord::from_payload(payload, app.now(), config.utc_offset);
    let row = store
        .append_row(&config.store_name, &record.to_row())
        .await
        .map_err(HandlerError::StoreWriteFailure)?;

    if config.notifications_enabled {
        let notification = Notification {
            recipient: &config.recipient_email,
            subject_template: &config.subject_template,
            record: &record,
        };
        app.notifier()
            .send(&notification)
            .await
            .map_err(|cause| HandlerError::NotificationFailure { row, cause })?;
    }

    if let Some(messenger) = app.messenger() {
        if let Err(err) = messenger.dispatch(&record).await {
            event!(Level::WARN, row, err = err.to_string(), "short message not sent");
        }
    }

    Ok(row)
}

/// Process a raw submission body and answer with an acknowledgement.
///
/// This never fails; every error becomes `{success: false, error}`.
pub async fn handle_submission<A: Application>(app: &A, raw: &[u8]) -> Ack {
    match try_handle_submission(app, raw).await {
        Ok(row) => {
            event!(Level::INFO, row, "submission saved");
            Ack::saved(row)
        }
        Err(err) => {
            event!(Level::ERROR, err = err.to_string(), "submission failed");
            Ack::failed(err.to_string(), err.row())
        }
    }
}

/// Report liveness along with the current server time.
pub fn health_check<A: Application>(app: &A) -> HealthStatus {
    HealthStatus {
        status: "OK".to_owned(),
        message: format!("{} Form API is running", app.config().service_name),
        timestamp: {
            let now = app.now();
            now.checked_to_offset(time::UtcOffset::UTC).unwrap_or(now)
        },
    }
}

/// The standard [`Application`]: a configuration value plus injected store,
/// notifier, and (optionally) messenger.
#[derive(Clone, Debug)]
pub struct SubmissionHandler<S, N, M = Infallible> {
    config: FormConfig,
    store: S,
    notifier: N,
    messenger: Option<M>,
}

impl<S, N> SubmissionHandler<S, N> {
    /// Create a handler without a short-message dispatcher.
    pub fn new(config: FormConfig, store: S, notifier: N) -> Self {
        Self {
            config,
            store,
            notifier,
            messenger: None,
        }
    }
}

impl<S, N, M> SubmissionHandler<S, N, M> {
    /// Attach a short-message dispatcher.
    pub fn with_messenger<T>(self, messenger: T) -> SubmissionHandler<S, N, T> {
        SubmissionHandler {
            config: self.config,
            store: self.store,
            notifier: self.notifier,
            messenger: Some(messenger),
        }
    }
}

impl<S, N, M> Application for SubmissionHandler<S, N, M>
where
    S: RecordStore + Sync,
    N: Notifier + Sync,
    M: Messenger + Sync,
{
    type Store = S;
    type Notifier = N;
    type Messenger = M;

    fn config(&self) -> &FormConfig {
        &self.config
    }

    fn store(&self) -> &S {
        &self.store
    }

    fn notifier(&self) -> &N {
        &self.notifier
    }

    fn messenger(&self) -> Option<&M> {
        self.messenger.as_ref()
    }
}
