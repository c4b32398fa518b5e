use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_SECURE: &str = "SMTP_SECURE";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";
pub const SMTP_FROM: &str = "SMTP_FROM";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const TWILIO_PHONE_NUMBER: &str = "TWILIO_PHONE_NUMBER";

/// # Summary
/// Injected key-value lookup the transport configuration is read from.
///
/// # Invariants
/// - Keys are the upper-case names listed in this module (e.g. `SMTP_HOST`).
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Transport configuration for both channels, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    pub email: EmailConfig,
    pub sms: SmsConfig,
}

/// # Summary
/// SMTP settings. Nothing here is validated; missing values surface at send time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    // Implicit TLS when true, opportunistic STARTTLS otherwise
    pub secure: bool,
    pub auth_user: Option<String>,
    pub auth_secret: Option<String>,
    pub from_address: Option<String>,
}

/// Twilio settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmsConfig {
    pub account_id: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
}

impl SmsConfig {
    /// # Summary
    /// Returns the account id and auth token when both are set.
    ///
    /// # Returns
    /// * `None` means the SMS capability is absent.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.account_id, &self.auth_token) {
            (Some(sid), Some(token)) => Some((sid.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl TransportConfig {
    /// # Summary
    /// Reads the transport configuration from a key-value source.
    ///
    /// # Logic
    /// 1. Blank values are treated as absent.
    /// 2. `SMTP_SECURE` is true only for the literal `true` (any case).
    /// 3. An unparsable `SMTP_PORT` is dropped with a warning so the default port applies.
    ///
    /// # Arguments
    /// * `source` - The injected lookup.
    ///
    /// # Returns
    /// * The parsed configuration; this never fails.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let lookup = |key: &str| {
            source
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = lookup(SMTP_PORT).and_then(|raw| match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                tracing::warn!("Ignoring invalid {} value {:?}: {}", SMTP_PORT, raw, e);
                None
            }
        });

        Self {
            email: EmailConfig {
                host: lookup(SMTP_HOST),
                port,
                secure: lookup(SMTP_SECURE).is_some_and(|v| v.eq_ignore_ascii_case("true")),
                auth_user: lookup(SMTP_USER),
                auth_secret: lookup(SMTP_PASS),
                from_address: lookup(SMTP_FROM),
            },
            sms: SmsConfig {
                account_id: lookup(TWILIO_ACCOUNT_SID),
                auth_token: lookup(TWILIO_AUTH_TOKEN),
                from_number: lookup(TWILIO_PHONE_NUMBER),
            },
        }
    }
}
