use async_trait::async_trait;
use herald_core::config::EmailConfig;
use herald_core::notify::entity::EmailMessage;
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::EmailTransport;
use lettre::message::{Message, header::ContentType};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::{SUBMISSION_PORT, SUBMISSIONS_PORT};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::warn;

/// Host used when `SMTP_HOST` is not configured.
const DEFAULT_HOST: &str = "localhost";

/// # Summary
/// An `EmailTransport` that delivers HTML mail over SMTP.
///
/// # Invariants
/// - Construction never fails and never opens a connection; the SMTP session is
///   established on the first `send`.
/// - A transport that could not be set up keeps the reason and reports it as a
///   `NotifyError::Config` on every send.
/// - The `AsyncSmtpTransport` is reused for all messages.
pub struct SmtpEmailTransport {
    mailer: Result<AsyncSmtpTransport<Tokio1Executor>, String>,
}

impl SmtpEmailTransport {
    /// # Summary
    /// Creates a new `SmtpEmailTransport`.
    ///
    /// # Logic
    /// 1. `secure` selects implicit TLS (default port 465), otherwise opportunistic
    ///    STARTTLS (default port 587).
    /// 2. Credentials are attached only when both user and secret are present.
    ///
    /// # Arguments
    /// * `config` - The SMTP section of the transport configuration.
    ///
    /// # Returns
    /// * A transport handle, even when the configuration is unusable.
    pub fn new(config: &EmailConfig) -> Self {
        let mailer = build_mailer(config);
        if let Err(e) = &mailer {
            warn!("SMTP transport not usable, email sends will fail: {}", e);
        }
        Self { mailer }
    }
}

/// TLS strategy selected by `EmailConfig::secure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsMode {
    // Implicit TLS from the first byte (SMTPS)
    Wrapper,
    // STARTTLS when the server offers it
    Opportunistic,
}

/// Resolves the TLS mode and port; an explicit port overrides the mode's default.
fn connection_mode(config: &EmailConfig) -> (TlsMode, u16) {
    let (mode, default_port) = if config.secure {
        (TlsMode::Wrapper, SUBMISSIONS_PORT)
    } else {
        (TlsMode::Opportunistic, SUBMISSION_PORT)
    };
    (mode, config.port.unwrap_or(default_port))
}

/// SMTP credentials, only when both user and secret are configured.
fn credentials(config: &EmailConfig) -> Option<Credentials> {
    match (&config.auth_user, &config.auth_secret) {
        (Some(user), Some(pass)) => Some(Credentials::new(user.clone(), pass.clone())),
        _ => None,
    }
}

fn build_mailer(config: &EmailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
    let host = config.host.as_deref().unwrap_or(DEFAULT_HOST);
    let params = TlsParameters::new(host.to_string())
        .map_err(|e| format!("Invalid SMTP host {}: {}", host, e))?;

    let (mode, port) = connection_mode(config);
    let tls = match mode {
        TlsMode::Wrapper => Tls::Wrapper(params),
        TlsMode::Opportunistic => Tls::Opportunistic(params),
    };

    let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        .port(port)
        .tls(tls);

    if let Some(creds) = credentials(config) {
        builder = builder.credentials(creds);
    }

    Ok(builder.build())
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
    /// # Summary
    /// Sends an HTML email.
    ///
    /// # Logic
    /// 1. Parses sender and recipient mailboxes.
    /// 2. Builds the message with a `text/html` body.
    /// 3. Sends it through the SMTP transport; SMTP replies map to `Platform`,
    ///    everything else to `Network`.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let mailer = self
            .mailer
            .as_ref()
            .map_err(|e| NotifyError::Config(e.clone()))?;

        let email = Message::builder()
            .from(
                message
                    .from
                    .parse()
                    .map_err(|e| NotifyError::Config(format!("Invalid from address: {}", e)))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|e| NotifyError::Config(format!("Invalid to address: {}", e)))?)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| NotifyError::Platform(format!("Failed to build email: {}", e)))?;

        mailer.send(email).await.map_err(|e| {
            if e.is_permanent() || e.is_transient() {
                NotifyError::Platform(format!("SMTP rejected message: {}", e))
            } else {
                NotifyError::Network(format!("SMTP error: {}", e))
            }
        })?;

        Ok(())
    }
}
