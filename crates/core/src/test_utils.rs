//! Recording transports for tests of code that depends on the notification ports.

use crate::notify::entity::{EmailMessage, SmsMessage};
use crate::notify::error::NotifyError;
use crate::notify::port::{EmailTransport, SmsTransport};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// # Summary
/// In-memory `EmailTransport` that records every message it is given.
///
/// # Invariants
/// - Every call to `send` counts as an attempt, including failing ones.
/// - When built with `failing`, every send returns the configured error and nothing is recorded.
#[derive(Default)]
pub struct MockEmailTransport {
    sent: Mutex<Vec<EmailMessage>>,
    attempts: AtomicUsize,
    failure: Option<NotifyError>,
}

impl MockEmailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: NotifyError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailTransport for MockEmailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// In-memory `SmsTransport`, same contract as `MockEmailTransport`.
#[derive(Default)]
pub struct MockSmsTransport {
    sent: Mutex<Vec<SmsMessage>>,
    attempts: AtomicUsize,
    failure: Option<NotifyError>,
}

impl MockSmsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: NotifyError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().await.clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsTransport for MockSmsTransport {
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
