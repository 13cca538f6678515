#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the intake-notify crate.
//! [intake_core]: https://docs.rs/intake_core/latest/intake_core/index.html
//! [intake_notify]: https://docs.rs/intake_notify/latest/intake_notify/index.html
#![doc = include_str!("../README.md")]

pub mod config;

mod email;
pub use email::EmailNotifier;

mod sms;
pub use sms::SmsMessenger;

mod templates;
pub use templates::{RenderedEmail, Templates};

/// Failures while rendering or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A template failed to compile or render
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A sender or recipient address is not a valid mailbox
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The email could not be assembled
    #[error("invalid message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The SMTP relay rejected the message or could not be reached
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The SMS gateway could not be reached or answered with an error status
    #[error("sms gateway error: {0}")]
    Http(#[from] reqwest::Error),
}
