use crate::models::SubmissionRecord;

/// Everything a notifier needs to tell staff about one submission.
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    /// Single fixed recipient address
    pub recipient: &'a str,
    /// Subject line template
    pub subject_template: &'a str,
    /// The record that was just appended
    pub record: &'a SubmissionRecord,
}

/// Delivers a notification (in practice, an email with HTML and plain-text
/// bodies) for a newly appended record.
pub trait Notifier {
    /// Error type for delivery failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render and deliver the notification.
    fn send(
        &self,
        notification: &Notification<'_>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
