use crate::notify::entity::{EmailMessage, SmsMessage};
use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// Outbound port for delivering an email through an external mail provider.
///
/// # Invariants
/// - Implementations must be `Send` and `Sync` so one handle serves concurrent sends.
/// - A failed delivery is reported as `Err`, never as a panic.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// # Summary
    /// Delivers a fully composed email.
    ///
    /// # Logic
    /// 1. Encodes the message for the provider (MIME, API payload, ...).
    /// 2. Hands it to the provider and waits for acceptance.
    ///
    /// # Arguments
    /// * `message` - Sender, recipient, subject and HTML body.
    ///
    /// # Returns
    /// * `Ok(())` once the provider accepted the message.
    /// * `Err(NotifyError)` on any network, configuration or provider failure.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// # Summary
/// Outbound port for delivering a text message through an SMS gateway.
///
/// # Invariants
/// - Implementations must be `Send` and `Sync`.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// # Summary
    /// Delivers a text message.
    ///
    /// # Arguments
    /// * `message` - Body, sender number and recipient number.
    ///
    /// # Returns
    /// * `Ok(())` once the gateway accepted the message.
    /// * `Err(NotifyError)` otherwise.
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError>;
}
