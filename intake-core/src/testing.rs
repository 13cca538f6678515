use crate::{
    models::{Row, RowStyle, StoredRow, SubmissionRecord},
    ports::{Messenger, Notification, Notifier, RecordStore},
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// Failures of the in-memory adapters.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// Rows can only be appended to a sheet that exists
    #[error("sheet `{0}` does not exist")]
    MissingSheet(String),

    /// The adapter was told to fail
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
}

/// A sheet store held in memory. Clones share the same sheets.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    sheets: Arc<Mutex<BTreeMap<String, Vec<StoredRow>>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), MemoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(MemoryError::Unavailable("store"))
        } else {
            Ok(())
        }
    }
}

impl RecordStore for MemoryStore {
    type Error = MemoryError;

    async fn ensure_sheet(&self, sheet: &str, header: &Row) -> Result<bool, Self::Error> {
        self.check()?;
        let mut sheets = self.sheets.lock().unwrap_or_else(|e| e.into_inner());
        if sheets.contains_key(sheet) {
            return Ok(false);
        }
        sheets.insert(
            sheet.to_owned(),
            vec![StoredRow {
                index: 1,
                cells: header.cells.clone(),
                style: header.style.clone(),
            }],
        );
        Ok(true)
    }

    async fn append_row(&self, sheet: &str, cells: &[String]) -> Result<u64, Self::Error> {
        self.check()?;
        let mut sheets = self.sheets.lock().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| MemoryError::MissingSheet(sheet.to_owned()))?;
        let index = rows.len() as u64 + 1;
        rows.push(StoredRow {
            index,
            cells: cells.to_vec(),
            style: RowStyle::default(),
        });
        Ok(index)
    }

    async fn rows(&self, sheet: &str) -> Result<Option<Vec<StoredRow>>, Self::Error> {
        self.check()?;
        let sheets = self.sheets.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sheets.get(sheet).cloned())
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentNotification {
    /// Recipient address
    pub recipient: String,
    /// Subject template as configured
    pub subject_template: String,
    /// The notified record
    pub record: SubmissionRecord,
}

/// A notifier that remembers what it was asked to send. Clones share the
/// same outbox.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Make every subsequent send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    type Error = MemoryError;

    async fn send(&self, notification: &Notification<'_>) -> Result<(), Self::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MemoryError::Unavailable("mail relay"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentNotification {
                recipient: notification.recipient.to_owned(),
                subject_template: notification.subject_template.to_owned(),
                record: notification.record.clone(),
            });
        Ok(())
    }
}

/// A short-message dispatcher that counts its dispatches.
#[derive(Clone, Debug, Default)]
pub struct RecordingMessenger {
    dispatched: Arc<Mutex<Vec<SubmissionRecord>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMessenger {
    /// Make every subsequent dispatch fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Records dispatched so far.
    pub fn dispatched(&self) -> Vec<SubmissionRecord> {
        self.dispatched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Messenger for RecordingMessenger {
    type Error = MemoryError;

    async fn dispatch(&self, record: &SubmissionRecord) -> Result<(), Self::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MemoryError::Unavailable("sms gateway"));
        }
        self.dispatched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }
}
