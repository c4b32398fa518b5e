use crate::notify::error::NotifyError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

/// # Summary
/// A single delivery request: who receives it and over which channel.
///
/// # Invariants
/// - Built per call and discarded after the send; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    // Email address or phone number, depending on `channel`
    pub recipient_address: String,
    pub channel: Channel,
}

impl NotificationRequest {
    pub fn email(to: impl Into<String>) -> Self {
        Self {
            recipient_address: to.into(),
            channel: Channel::Email,
        }
    }

    pub fn sms(to: impl Into<String>) -> Self {
        Self {
            recipient_address: to.into(),
            channel: Channel::Sms,
        }
    }
}

/// # Summary
/// Channel-specific content produced by the renderer.
///
/// # Invariants
/// - `subject` is `Some` for email renderings and `None` for SMS renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: Option<String>,
    pub body: String,
}

/// Payload handed to an `EmailTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Payload handed to an `SmsTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub body: String,
    pub from: String,
    pub to: String,
}

/// Parameters of a "submission received" notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceived {
    pub user_email: String,
    pub user_name: String,
}

/// Parameters of a "submission approved" notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionApproved {
    pub user_email: String,
    pub user_name: String,
    pub points: u64,
}

/// Parameters of a "submission rejected" notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRejected {
    pub user_email: String,
    pub user_name: String,
    pub reason: String,
}

/// # Summary
/// Parameters shared by the "cashout initiated" and "cashout completed" notifications.
///
/// # Invariants
/// - `amount` is rendered with exactly two decimal places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashoutProgress {
    pub user_email: String,
    pub user_name: String,
    pub amount: Decimal,
    // Payout method, e.g. "PayPal" or "Bank transfer"
    pub method: String,
}

/// Parameters of a "cashout failed" notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashoutFailed {
    pub user_email: String,
    pub user_name: String,
    pub amount: Decimal,
    pub reason: String,
}

/// # Summary
/// A domain occurrence that triggers a user notification.
///
/// # Invariants
/// - Every field of every payload is required; nothing is defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusinessEvent {
    SubmissionReceived(SubmissionReceived),
    SubmissionApproved(SubmissionApproved),
    SubmissionRejected(SubmissionRejected),
    CashoutInitiated(CashoutProgress),
    CashoutCompleted(CashoutProgress),
    CashoutFailed(CashoutFailed),
}

impl BusinessEvent {
    /// Email address of the user the event concerns.
    pub fn user_email(&self) -> &str {
        match self {
            BusinessEvent::SubmissionReceived(p) => &p.user_email,
            BusinessEvent::SubmissionApproved(p) => &p.user_email,
            BusinessEvent::SubmissionRejected(p) => &p.user_email,
            BusinessEvent::CashoutInitiated(p) | BusinessEvent::CashoutCompleted(p) => &p.user_email,
            BusinessEvent::CashoutFailed(p) => &p.user_email,
        }
    }

    /// Stable name used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            BusinessEvent::SubmissionReceived(_) => "submission_received",
            BusinessEvent::SubmissionApproved(_) => "submission_approved",
            BusinessEvent::SubmissionRejected(_) => "submission_rejected",
            BusinessEvent::CashoutInitiated(_) => "cashout_initiated",
            BusinessEvent::CashoutCompleted(_) => "cashout_completed",
            BusinessEvent::CashoutFailed(_) => "cashout_failed",
        }
    }
}

/// # Summary
/// Result of a single delivery attempt.
///
/// # Invariants
/// - Producing an outcome never panics and never propagates an error to the caller.
/// - `Unavailable` means no transport was contacted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message
    Delivered,
    /// The channel has no configured transport
    Unavailable,
    /// The transport was contacted and reported a failure
    Failed(NotifyError),
}

impl DeliveryOutcome {
    /// The plain success flag of the delivery protocol.
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }

    /// The failure cause, if the transport reported one.
    pub fn error(&self) -> Option<&NotifyError> {
        match self {
            DeliveryOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Result<(), NotifyError>> for DeliveryOutcome {
    fn from(result: Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => DeliveryOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_flags() {
        assert!(DeliveryOutcome::Delivered.is_delivered());
        assert!(!DeliveryOutcome::Unavailable.is_delivered());

        let failed = DeliveryOutcome::from(Err(NotifyError::Network("refused".into())));
        assert!(!failed.is_delivered());
        assert_eq!(failed.error(), Some(&NotifyError::Network("refused".into())));
        assert_eq!(DeliveryOutcome::from(Ok(())), DeliveryOutcome::Delivered);
    }

    #[test]
    fn test_event_accessors() {
        let event = BusinessEvent::CashoutCompleted(CashoutProgress {
            user_email: "ana@example.com".into(),
            user_name: "Ana".into(),
            amount: dec!(12.5),
            method: "PayPal".into(),
        });
        assert_eq!(event.user_email(), "ana@example.com");
        assert_eq!(event.kind(), "cashout_completed");
    }

    #[test]
    fn test_event_serde_keeps_amount_exact() -> Result<(), serde_json::Error> {
        let event = BusinessEvent::CashoutFailed(CashoutFailed {
            user_email: "ana@example.com".into(),
            user_name: "Ana".into(),
            amount: dec!(1234.50),
            reason: "Account closed".into(),
        });

        let json = serde_json::to_value(&event)?;
        assert_eq!(json["kind"], "cashout_failed");
        assert_eq!(json["amount"], "1234.50");

        let back: BusinessEvent = serde_json::from_value(json)?;
        assert_eq!(back, event);
        assert_eq!(serde_json::to_string(&Channel::Sms)?, "\"sms\"");
        Ok(())
    }

    #[test]
    fn test_request_constructors() {
        let req = NotificationRequest::sms("+15550100");
        assert_eq!(req.channel, Channel::Sms);
        assert_eq!(req.recipient_address, "+15550100");
        assert_eq!(NotificationRequest::email("a@b.com").channel.to_string(), "email");
    }
}
