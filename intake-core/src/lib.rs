#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the intake-core crate.
//! [intake_core]: https://docs.rs/intake_core/latest/intake_core/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the intake service.
///
/// The submission payload, the normalized record that lands in the sheet,
/// the acknowledgement returned to callers, and the date-time helpers that
/// render timestamps in the configured timezone.
pub mod models;

/// Interface traits for the intake service.
///
/// These are the "ports" of the hexagonal layout: the handler talks to the
/// sheet store, the email notifier, and the short-message dispatcher only
/// through these traits.
pub mod ports;

/// Static configuration injected into the handler at construction time.
pub mod config;

mod handler;
pub use handler::{
    HandlerError, SubmissionError, SubmissionHandler, handle_submission, health_check,
    try_handle_submission,
};

/// In-memory adapters for exercising the handler without external services.
#[cfg(feature = "testing")]
pub mod testing;
