use herald_core::config::{SMTP_FROM, SMTP_HOST, SMTP_PORT, TransportConfig};
use herald_core::notify::entity::{
    BusinessEvent, CashoutProgress, DeliveryOutcome, NotificationRequest, RenderedMessage,
    SubmissionApproved,
};
use herald_core::notify::error::NotifyError;
use herald_core::test_utils::{MockEmailTransport, MockSmsTransport};
use herald_notify::{NotificationDispatcher, SenderIdentity, TransportContext};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

fn sender() -> SenderIdentity {
    SenderIdentity {
        from_address: "Rewards <noreply@example.com>".to_string(),
        from_number: "+15550100".to_string(),
    }
}

fn dispatcher_with(
    email: Arc<MockEmailTransport>,
    sms: Option<Arc<MockSmsTransport>>,
) -> NotificationDispatcher {
    let sms = sms.map(|s| s as Arc<dyn herald_core::notify::port::SmsTransport>);
    NotificationDispatcher::new(TransportContext::new(email, sms, sender()))
}

#[tokio::test]
async fn test_send_email_delivered() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    let outcome = dispatcher.send_email("a@b.com", "s", "<p>b</p>").await;

    assert_eq!(outcome, DeliveryOutcome::Delivered);
    let sent = email.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, "Rewards <noreply@example.com>");
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].subject, "s");
    assert_eq!(sent[0].html, "<p>b</p>");
}

#[tokio::test]
async fn test_send_email_failure_is_absorbed() {
    let email = Arc::new(MockEmailTransport::failing(NotifyError::Network(
        "connection refused".into(),
    )));
    let dispatcher = dispatcher_with(email.clone(), None);

    let outcome = dispatcher.send_email("a@b.com", "s", "b").await;

    assert!(!outcome.is_delivered());
    assert_eq!(
        outcome.error(),
        Some(&NotifyError::Network("connection refused".into()))
    );
    assert_eq!(email.attempts(), 1);
}

#[tokio::test]
async fn test_send_sms_without_transport_is_unavailable() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    let outcome = dispatcher.send_sms("x", "y").await;

    assert_eq!(outcome, DeliveryOutcome::Unavailable);
    assert_eq!(email.attempts(), 0);
}

#[tokio::test]
async fn test_send_sms_uses_sender_number() {
    let sms = Arc::new(MockSmsTransport::new());
    let dispatcher = dispatcher_with(Arc::new(MockEmailTransport::new()), Some(sms.clone()));

    let outcome = dispatcher.send_sms("+15550199", "Your code is 1234").await;

    assert!(outcome.is_delivered());
    let sent = sms.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, "+15550100");
    assert_eq!(sent[0].to, "+15550199");
    assert_eq!(sent[0].body, "Your code is 1234");
}

#[tokio::test]
async fn test_send_sms_failure_is_absorbed() {
    let sms = Arc::new(MockSmsTransport::failing(NotifyError::Platform(
        "invalid number".into(),
    )));
    let dispatcher = dispatcher_with(Arc::new(MockEmailTransport::new()), Some(sms.clone()));

    let outcome = dispatcher.send_sms("123", "hello").await;

    assert!(matches!(outcome, DeliveryOutcome::Failed(NotifyError::Platform(_))));
    assert_eq!(sms.attempts(), 1);
}

#[tokio::test]
async fn test_deliver_routes_by_channel() {
    let email = Arc::new(MockEmailTransport::new());
    let sms = Arc::new(MockSmsTransport::new());
    let dispatcher = dispatcher_with(email.clone(), Some(sms.clone()));
    let message = RenderedMessage {
        subject: None,
        body: "body".to_string(),
    };

    dispatcher
        .deliver(&NotificationRequest::email("a@b.com"), &message)
        .await;
    dispatcher
        .deliver(&NotificationRequest::sms("+15550199"), &message)
        .await;

    assert_eq!(email.sent().await[0].subject, "");
    assert_eq!(sms.sent().await[0].body, "body");
}

#[tokio::test]
async fn test_business_events_render_literal_values() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    dispatcher
        .notify_submission_received("ana@example.com", "Ana & Co")
        .await;
    dispatcher
        .notify_submission_approved("ana@example.com", "Ana & Co", 250)
        .await;
    dispatcher
        .notify_submission_rejected("ana@example.com", "Ana & Co", "Duplicate receipt")
        .await;
    dispatcher
        .notify_cashout_initiated("ana@example.com", "Ana & Co", dec!(1234.5), "PayPal")
        .await;
    dispatcher
        .notify_cashout_completed("ana@example.com", "Ana & Co", dec!(0), "Bank transfer")
        .await;
    dispatcher
        .notify_cashout_failed("ana@example.com", "Ana & Co", dec!(42.1), "Account closed")
        .await;

    let sent = email.sent().await;
    assert_eq!(sent.len(), 6);
    for message in &sent {
        assert_eq!(message.to, "ana@example.com");
        assert!(message.html.contains("Ana & Co"));
    }
    assert!(sent[1].html.contains("250"));
    assert!(sent[2].html.contains("Duplicate receipt"));
    assert!(sent[3].html.contains("$1234.50"));
    assert!(sent[3].html.contains("PayPal"));
    assert!(sent[3].html.contains("Processing"));
    assert!(sent[4].html.contains("$0.00"));
    assert!(sent[4].html.contains("Bank transfer"));
    assert!(sent[4].html.contains("Completed"));
    assert!(sent[5].html.contains("$42.10"));
    assert!(sent[5].html.contains("Account closed"));
}

#[tokio::test]
async fn test_business_events_complete_when_transport_fails() {
    let email = Arc::new(MockEmailTransport::failing(NotifyError::Network(
        "timeout".into(),
    )));
    let dispatcher = dispatcher_with(email.clone(), None);

    let outcomes = vec![
        dispatcher.notify_submission_received("a@b.com", "A").await,
        dispatcher.notify_submission_approved("a@b.com", "A", 1).await,
        dispatcher.notify_submission_rejected("a@b.com", "A", "r").await,
        dispatcher
            .notify_cashout_initiated("a@b.com", "A", dec!(1), "m")
            .await,
        dispatcher
            .notify_cashout_completed("a@b.com", "A", dec!(1), "m")
            .await,
        dispatcher
            .notify_cashout_failed("a@b.com", "A", dec!(1), "r")
            .await,
    ];

    assert!(outcomes.iter().all(|o| !o.is_delivered()));
    assert_eq!(email.attempts(), 6);
}

#[tokio::test]
async fn test_repeated_event_sends_twice_with_identical_content() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    for _ in 0..2 {
        dispatcher
            .notify_submission_approved("ana@example.com", "Ana", 100)
            .await;
    }

    let sent = email.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
}

#[tokio::test]
async fn test_notify_sms_renders_plain_text() {
    let sms = Arc::new(MockSmsTransport::new());
    let dispatcher = dispatcher_with(Arc::new(MockEmailTransport::new()), Some(sms.clone()));
    let event = BusinessEvent::CashoutCompleted(CashoutProgress {
        user_email: "ana@example.com".into(),
        user_name: "Ana".into(),
        amount: dec!(10),
        method: "PayPal".into(),
    });

    let outcome = dispatcher.notify_sms("+15550199", &event).await;

    assert!(outcome.is_delivered());
    let sent = sms.sent().await;
    assert_eq!(
        sent[0].body,
        "Hi Ana, your cash-out of $10.00 via PayPal is Completed."
    );
}

#[tokio::test]
async fn test_dispatch_detached_runs_in_background() -> anyhow::Result<()> {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);
    let event = BusinessEvent::SubmissionApproved(SubmissionApproved {
        user_email: "ana@example.com".into(),
        user_name: "Ana".into(),
        points: 5,
    });

    let handle = dispatcher
        .dispatch_detached(event)
        .ok_or_else(|| anyhow::anyhow!("no Tokio runtime"))?;
    let outcome = handle.await?;

    assert!(outcome.is_delivered());
    assert_eq!(email.attempts(), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_sends_are_independent() -> anyhow::Result<()> {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .send_email(&format!("user{}@example.com", i), "s", "b")
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await?.is_delivered());
    }

    assert_eq!(email.sent().await.len(), 10);
    Ok(())
}

#[tokio::test]
async fn test_smtp_configured_twilio_unconfigured() {
    // Port 1 is never an SMTP listener, so the email attempt fails at connect time.
    let source: HashMap<String, String> = [
        (SMTP_HOST.to_string(), "localhost".to_string()),
        (SMTP_PORT.to_string(), "1".to_string()),
        (SMTP_FROM.to_string(), "noreply@example.com".to_string()),
    ]
    .into_iter()
    .collect();
    let dispatcher = NotificationDispatcher::from_config(&TransportConfig::from_source(&source));

    assert!(!dispatcher.context().sms_available());
    assert_eq!(dispatcher.send_sms("x", "y").await, DeliveryOutcome::Unavailable);

    let outcome = dispatcher.send_email("a@b.com", "s", "b").await;
    assert!(
        matches!(outcome, DeliveryOutcome::Failed(NotifyError::Network(_))),
        "{:?}",
        outcome
    );
}

#[tokio::test]
async fn test_email_outcome_ignores_missing_sms_transport() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);

    assert_eq!(dispatcher.send_sms("x", "y").await, DeliveryOutcome::Unavailable);
    assert_eq!(email.attempts(), 0);

    assert_eq!(
        dispatcher.send_email("a@b.com", "s", "b").await,
        DeliveryOutcome::Delivered
    );
    assert_eq!(email.attempts(), 1);
}

#[test]
fn test_dispatch_detached_outside_runtime_is_skipped() {
    let email = Arc::new(MockEmailTransport::new());
    let dispatcher = dispatcher_with(email.clone(), None);
    let event = BusinessEvent::SubmissionApproved(SubmissionApproved {
        user_email: "ana@example.com".into(),
        user_name: "Ana".into(),
        points: 5,
    });

    assert!(dispatcher.dispatch_detached(event).is_none());
    assert_eq!(email.attempts(), 0);
}
