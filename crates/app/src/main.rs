mod settings;

use herald_core::config::{ConfigSource, TransportConfig};
use herald_core::notify::entity::{BusinessEvent, SubmissionReceived};
use herald_notify::NotificationDispatcher;
use settings::EnvSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Recipient of the startup smoke email, if set.
const SMOKE_EMAIL: &str = "HERALD_SMOKE_EMAIL";
/// Recipient of the startup smoke SMS, if set.
const SMOKE_PHONE: &str = "HERALD_SMOKE_PHONE";

/// # Summary
/// Application entry point: wires configuration into the dispatcher.
///
/// # Logic
/// 1. Initialize logging (`RUST_LOG`, default `info`).
/// 2. Read the transport configuration from `.env` and the environment.
/// 3. Build the dispatcher; transports connect lazily.
/// 4. Send the optional smoke notifications and report their outcome.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Herald starting...");

    // 2. Configuration
    let source = EnvSource::load()?;
    let config = TransportConfig::from_source(&source);

    // 3. Dispatcher
    let dispatcher = NotificationDispatcher::from_config(&config);
    info!(
        "Dispatcher ready (sms: {})",
        if dispatcher.context().sms_available() { "enabled" } else { "disabled" }
    );

    // 4. Smoke notifications
    if let Some(to) = source.get(SMOKE_EMAIL) {
        let event = BusinessEvent::SubmissionReceived(SubmissionReceived {
            user_email: to,
            user_name: "Herald".to_string(),
        });
        let outcome = dispatcher.notify(&event).await;
        info!("Smoke email outcome: {:?}", outcome);
    }

    if let Some(to) = source.get(SMOKE_PHONE) {
        let outcome = dispatcher.send_sms(&to, "Herald smoke test").await;
        if !outcome.is_delivered() {
            warn!("Smoke SMS not delivered: {:?}", outcome);
        }
    }

    info!("Done.");
    Ok(())
}
