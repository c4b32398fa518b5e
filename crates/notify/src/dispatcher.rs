use crate::context::TransportContext;
use crate::template::{render_email, render_sms};
use herald_core::common::mask_phone_number;
use herald_core::config::TransportConfig;
use herald_core::notify::entity::{
    BusinessEvent, CashoutFailed, CashoutProgress, Channel, DeliveryOutcome, EmailMessage,
    NotificationRequest, RenderedMessage, SmsMessage, SubmissionApproved, SubmissionReceived,
    SubmissionRejected,
};
use herald_core::notify::port::{EmailTransport, SmsTransport};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// # Summary
/// Renders notifications and delivers them over email or SMS, best effort.
///
/// # Invariants
/// - No operation panics or returns an error; every failure is absorbed into a
///   `DeliveryOutcome` and an `error`/`warn` log record.
/// - Holds no mutable state; clones share the same transport handles.
#[derive(Clone)]
pub struct NotificationDispatcher {
    context: Arc<TransportContext>,
}

impl NotificationDispatcher {
    pub fn new(context: TransportContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Builds the production transports from configuration and wraps them.
    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(TransportContext::from_config(config))
    }

    pub fn context(&self) -> &TransportContext {
        &self.context
    }

    /// # Summary
    /// Sends an HTML email from the configured sender address.
    ///
    /// # Logic
    /// 1. Composes the message; `to` is not validated here.
    /// 2. Hands it to the email transport.
    /// 3. Logs the outcome with the recipient.
    ///
    /// # Arguments
    /// * `to` - Recipient address.
    /// * `subject` - Subject line.
    /// * `body` - HTML body.
    ///
    /// # Returns
    /// * `Delivered` or `Failed` with the transport error.
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> DeliveryOutcome {
        let message = EmailMessage {
            from: self.context.sender().from_address.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: body.to_string(),
        };

        match self.context.email().send(&message).await {
            Ok(()) => {
                info!("Email sent to {}", to);
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                error!("Failed to send email to {}: {}", to, e);
                DeliveryOutcome::Failed(e)
            }
        }
    }

    /// # Summary
    /// Sends a text message from the configured sender number.
    ///
    /// # Logic
    /// 1. Without an SMS transport, logs a warning and returns `Unavailable`
    ///    without contacting anything.
    /// 2. Otherwise sends through the SMS transport and logs the outcome with the
    ///    masked recipient number.
    ///
    /// # Returns
    /// * `Delivered`, `Unavailable` or `Failed`.
    pub async fn send_sms(&self, to: &str, body: &str) -> DeliveryOutcome {
        let Some(sms) = self.context.sms() else {
            warn!(
                "SMS transport not configured, dropping message to {}",
                mask_phone_number(to)
            );
            return DeliveryOutcome::Unavailable;
        };

        let message = SmsMessage {
            body: body.to_string(),
            from: self.context.sender().from_number.clone(),
            to: to.to_string(),
        };

        match sms.send(&message).await {
            Ok(()) => {
                info!("SMS sent to {}", mask_phone_number(to));
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                error!("Failed to send SMS to {}: {}", mask_phone_number(to), e);
                DeliveryOutcome::Failed(e)
            }
        }
    }

    /// # Summary
    /// Routes already rendered content to the channel named by the request.
    ///
    /// # Logic
    /// Email uses the rendered subject (empty when absent); SMS ignores it.
    pub async fn deliver(
        &self,
        request: &NotificationRequest,
        message: &RenderedMessage,
    ) -> DeliveryOutcome {
        match request.channel {
            Channel::Email => {
                let subject = message.subject.as_deref().unwrap_or_default();
                self.send_email(&request.recipient_address, subject, &message.body)
                    .await
            }
            Channel::Sms => self.send_sms(&request.recipient_address, &message.body).await,
        }
    }

    /// # Summary
    /// Emails the user an event's notification.
    ///
    /// # Returns
    /// * The delivery outcome. Callers may drop it; it never carries an `Err`.
    pub async fn notify(&self, event: &BusinessEvent) -> DeliveryOutcome {
        let request = NotificationRequest::email(event.user_email());
        let message = render_email(event);
        let outcome = self.deliver(&request, &message).await;
        if !outcome.is_delivered() {
            warn!("{} notification was not delivered", event.kind());
        }
        outcome
    }

    /// Texts an event's notification to `to`.
    pub async fn notify_sms(&self, to: &str, event: &BusinessEvent) -> DeliveryOutcome {
        let request = NotificationRequest::sms(to);
        let message = render_sms(event);
        self.deliver(&request, &message).await
    }

    /// # Summary
    /// Fires the email notification on the current Tokio runtime without waiting for it.
    ///
    /// # Logic
    /// 1. Looks up the ambient runtime handle.
    /// 2. Outside a runtime, logs a warning and sends nothing.
    ///
    /// # Returns
    /// * `Some(handle)` for the spawned task; awaiting it is optional.
    /// * `None` when called outside a Tokio runtime.
    pub fn dispatch_detached(&self, event: BusinessEvent) -> Option<JoinHandle<DeliveryOutcome>> {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Cannot dispatch {} notification without a runtime: {}", event.kind(), e);
                return None;
            }
        };
        let dispatcher = self.clone();
        Some(runtime.spawn(async move { dispatcher.notify(&event).await }))
    }

    pub async fn notify_submission_received(
        &self,
        user_email: &str,
        user_name: &str,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::SubmissionReceived(SubmissionReceived {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
        }))
        .await
    }

    pub async fn notify_submission_approved(
        &self,
        user_email: &str,
        user_name: &str,
        points: u64,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::SubmissionApproved(SubmissionApproved {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            points,
        }))
        .await
    }

    pub async fn notify_submission_rejected(
        &self,
        user_email: &str,
        user_name: &str,
        reason: &str,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::SubmissionRejected(SubmissionRejected {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            reason: reason.to_string(),
        }))
        .await
    }

    pub async fn notify_cashout_initiated(
        &self,
        user_email: &str,
        user_name: &str,
        amount: Decimal,
        method: &str,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::CashoutInitiated(CashoutProgress {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            amount,
            method: method.to_string(),
        }))
        .await
    }

    pub async fn notify_cashout_completed(
        &self,
        user_email: &str,
        user_name: &str,
        amount: Decimal,
        method: &str,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::CashoutCompleted(CashoutProgress {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            amount,
            method: method.to_string(),
        }))
        .await
    }

    pub async fn notify_cashout_failed(
        &self,
        user_email: &str,
        user_name: &str,
        amount: Decimal,
        reason: &str,
    ) -> DeliveryOutcome {
        self.notify(&BusinessEvent::CashoutFailed(CashoutFailed {
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            amount,
            reason: reason.to_string(),
        }))
        .await
    }
}
