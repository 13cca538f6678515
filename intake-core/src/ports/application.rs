use super::{Messenger, Notifier, RecordStore};
use crate::config::FormConfig;
use time::OffsetDateTime;

/// The collection of capabilities the submission handler runs against.
///
/// [`crate::SubmissionHandler`] is the standard implementation; tests and
/// alternative hosts may provide their own, for example to pin the clock.
pub trait Application {
    /// The sheet store
    type Store: RecordStore + Sync;
    /// The email notifier
    type Notifier: Notifier + Sync;
    /// The optional short-message dispatcher
    type Messenger: Messenger + Sync;

    /// Static handler configuration
    fn config(&self) -> &FormConfig;

    /// Access the sheet store
    fn store(&self) -> &Self::Store;

    /// Access the email notifier
    fn notifier(&self) -> &Self::Notifier;

    /// Access the short-message dispatcher, if one is enabled
    fn messenger(&self) -> Option<&Self::Messenger>;

    /// The current server time
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
