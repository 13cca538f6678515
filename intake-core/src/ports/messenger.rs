use crate::models::SubmissionRecord;
use std::convert::Infallible;

/// Dispatches a short text message (SMS) about a newly appended record.
///
/// Failures are reported to the caller but never fail the submission.
pub trait Messenger {
    /// Error type for dispatch failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send the short message.
    fn dispatch(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

// Stands in for "no messenger configured"; it can never be constructed.
impl Messenger for Infallible {
    type Error = Infallible;

    async fn dispatch(&self, _record: &SubmissionRecord) -> Result<(), Self::Error> {
        match *self {}
    }
}
