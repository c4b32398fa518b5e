use crate::email::SmtpEmailTransport;
use crate::sms::TwilioSmsTransport;
use herald_core::config::TransportConfig;
use herald_core::notify::port::{EmailTransport, SmsTransport};
use std::sync::Arc;
use tracing::{info, warn};

/// # Summary
/// Sender identity stamped on every outgoing message.
///
/// # Invariants
/// - Empty values are kept as-is and rejected by the transport at send time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderIdentity {
    pub from_address: String,
    pub from_number: String,
}

/// # Summary
/// The long-lived transport handles the dispatcher works with.
///
/// # Invariants
/// - Immutable once built; shared read-only between concurrent sends.
/// - `sms` is `None` exactly when the SMS capability is absent.
#[derive(Clone)]
pub struct TransportContext {
    email: Arc<dyn EmailTransport>,
    sms: Option<Arc<dyn SmsTransport>>,
    sender: SenderIdentity,
}

impl TransportContext {
    /// # Summary
    /// Builds a context from explicit transports, e.g. mocks in tests.
    pub fn new(
        email: Arc<dyn EmailTransport>,
        sms: Option<Arc<dyn SmsTransport>>,
        sender: SenderIdentity,
    ) -> Self {
        Self { email, sms, sender }
    }

    /// # Summary
    /// Builds the production transports from configuration.
    ///
    /// # Logic
    /// 1. Always creates the SMTP transport; it connects lazily on first send.
    /// 2. Creates the Twilio transport only when account SID and auth token are both set.
    ///
    /// # Arguments
    /// * `config` - The transport configuration, read once.
    ///
    /// # Returns
    /// * A ready context; this never fails.
    pub fn from_config(config: &TransportConfig) -> Self {
        let email: Arc<dyn EmailTransport> = Arc::new(SmtpEmailTransport::new(&config.email));

        let sms: Option<Arc<dyn SmsTransport>> = match config.sms.credentials() {
            Some((sid, token)) => {
                info!("Twilio SMS transport configured");
                let twilio: Arc<dyn SmsTransport> = Arc::new(TwilioSmsTransport::new(sid, token));
                Some(twilio)
            }
            None => {
                warn!("Twilio credentials not configured, SMS notifications are disabled");
                None
            }
        };

        let sender = SenderIdentity {
            from_address: config.email.from_address.clone().unwrap_or_default(),
            from_number: config.sms.from_number.clone().unwrap_or_default(),
        };

        Self { email, sms, sender }
    }

    pub fn email(&self) -> &Arc<dyn EmailTransport> {
        &self.email
    }

    pub fn sms(&self) -> Option<&Arc<dyn SmsTransport>> {
        self.sms.as_ref()
    }

    pub fn sender(&self) -> &SenderIdentity {
        &self.sender
    }

    pub fn sms_available(&self) -> bool {
        self.sms.is_some()
    }
}
