use thiserror::Error;

/// # Summary
/// Notification delivery error enum.
///
/// # Invariants
/// - Must derive `Error` through `thiserror`.
/// - Never escapes the dispatcher; it is carried inside `DeliveryOutcome::Failed`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Connection or transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration problem (missing host, malformed sender address, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error returned by the delivery platform (SMTP reply, Twilio API error)
    #[error("Platform error: {0}")]
    Platform(String),
}
