//! Error types for remote mutations.

use thiserror::Error;

/// Failures a [`MutationClient`](super::MutationClient) can report.
///
/// From the console's point of view these are all one kind of failure: the
/// mutation did not happen. The variants only exist to keep the log lines
/// useful.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MutationError {
    /// The record does not exist (anymore) on the service side.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The service rejected the payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The call never produced an answer (transport, timeout, 5xx...).
    #[error("Network error: {0}")]
    Network(String),

    /// The service stopped accepting requests.
    #[error("Service closed")]
    ServiceClosed,

    /// The service accepted the request but dropped the response channel.
    #[error("Service dropped response channel")]
    ServiceDropped,
}
