use async_trait::async_trait;
use herald_core::notify::entity::SmsMessage;
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::SmsTransport;
use serde::{Deserialize, Serialize};

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// # Summary
/// An `SmsTransport` that sends text messages through the Twilio Messages API.
///
/// # Invariants
/// * `account_sid` and `auth_token` are both present; a context without them
///   never constructs this transport.
pub struct TwilioSmsTransport {
    /// The Twilio account SID, also the basic-auth user.
    account_sid: String,
    /// The Twilio auth token.
    auth_token: String,
    /// The HTTP client used for requests.
    client: reqwest::Client,
}

/// # Summary
/// Form payload of the `Messages.json` endpoint.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TwilioMessageForm<'a> {
    to: &'a str,
    from: &'a str,
    body: &'a str,
}

/// Error document returned by Twilio on non-2xx responses.
#[derive(Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: String,
}

impl TwilioSmsTransport {
    /// # Summary
    /// Creates a new `TwilioSmsTransport`.
    ///
    /// # Arguments
    /// * `account_sid` - The Twilio account SID.
    /// * `auth_token` - The Twilio auth token.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.account_sid
        )
    }
}

/// Turns a Twilio error response into a readable message, falling back to the raw text.
fn describe_twilio_error(status: reqwest::StatusCode, text: &str) -> String {
    match serde_json::from_str::<TwilioErrorBody>(text) {
        Ok(TwilioErrorBody {
            code: Some(code),
            message,
        }) => format!("Twilio API error {} ({}): {}", status, code, message),
        Ok(TwilioErrorBody { code: None, message }) => {
            format!("Twilio API error {}: {}", status, message)
        }
        Err(_) => format!("Twilio API error {}: {}", status, text),
    }
}

#[async_trait]
impl SmsTransport for TwilioSmsTransport {
    /// # Summary
    /// Sends a text message via Twilio.
    ///
    /// # Logic
    /// 1. Posts `To`/`From`/`Body` as a form with basic authentication.
    /// 2. Maps request failures to `Network` and non-success statuses to `Platform`.
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError> {
        let form = TwilioMessageForm {
            to: &message.to,
            from: &message.from,
            body: &message.body,
        };

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Platform(describe_twilio_error(
                status,
                &error_text,
            )));
        }

        Ok(())
    }
}
