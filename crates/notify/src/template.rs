//! Pure renderers from business events to channel content.
//!
//! Every template substitutes its parameters verbatim; there is no branching
//! on parameter values.

use herald_core::notify::entity::{
    BusinessEvent, CashoutFailed, CashoutProgress, RenderedMessage, SubmissionApproved,
    SubmissionReceived, SubmissionRejected,
};

pub use herald_core::common::format_amount;

/// # Summary
/// Renders the email (subject and HTML body) for an event.
///
/// # Arguments
/// * `event` - The business event.
///
/// # Returns
/// * A `RenderedMessage` whose `subject` is always `Some`.
pub fn render_email(event: &BusinessEvent) -> RenderedMessage {
    let (subject, body) = match event {
        BusinessEvent::SubmissionReceived(p) => submission_received(p),
        BusinessEvent::SubmissionApproved(p) => submission_approved(p),
        BusinessEvent::SubmissionRejected(p) => submission_rejected(p),
        BusinessEvent::CashoutInitiated(p) => cashout_initiated(p),
        BusinessEvent::CashoutCompleted(p) => cashout_completed(p),
        BusinessEvent::CashoutFailed(p) => cashout_failed(p),
    };
    RenderedMessage {
        subject: Some(subject),
        body,
    }
}

/// # Summary
/// Renders the plain-text SMS body for an event.
///
/// # Returns
/// * A `RenderedMessage` without subject.
pub fn render_sms(event: &BusinessEvent) -> RenderedMessage {
    let body = match event {
        BusinessEvent::SubmissionReceived(p) => format!(
            "Hi {}, we received your submission. Status: Pending review.",
            p.user_name
        ),
        BusinessEvent::SubmissionApproved(p) => format!(
            "Hi {}, your submission was approved! You earned {} points.",
            p.user_name, p.points
        ),
        BusinessEvent::SubmissionRejected(p) => format!(
            "Hi {}, your submission was not approved. Reason: {}",
            p.user_name, p.reason
        ),
        BusinessEvent::CashoutInitiated(p) => format!(
            "Hi {}, your cash-out of {} via {} is Processing.",
            p.user_name,
            format_amount(p.amount),
            p.method
        ),
        BusinessEvent::CashoutCompleted(p) => format!(
            "Hi {}, your cash-out of {} via {} is Completed.",
            p.user_name,
            format_amount(p.amount),
            p.method
        ),
        BusinessEvent::CashoutFailed(p) => format!(
            "Hi {}, your cash-out of {} failed: {}. Your points have been refunded.",
            p.user_name,
            format_amount(p.amount),
            p.reason
        ),
    };
    RenderedMessage {
        subject: None,
        body,
    }
}

// Shared HTML frame around every email body.
fn layout(heading: &str, accent: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; margin: 0; padding: 20px;">
    <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
        <div style="background: {accent}; color: #ffffff; padding: 20px;">
            <h1 style="margin: 0; font-size: 20px;">{heading}</h1>
        </div>
        <div style="padding: 20px; color: #333333; font-size: 16px;">
{content}
        </div>
        <div style="padding: 15px 20px; background: #f8f9fa; color: #666666; font-size: 12px; text-align: center;">
            This is an automated message, please do not reply.
        </div>
    </div>
</body>
</html>"#
    )
}

fn submission_received(p: &SubmissionReceived) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Thanks for your submission! We have received it and our team will review it shortly.</p>
            <p><strong>Status:</strong> Pending review</p>"#,
        name = p.user_name
    );
    (
        "We received your submission".to_string(),
        layout("Submission Received", "#6c757d", &content),
    )
}

fn submission_approved(p: &SubmissionApproved) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Great news! Your submission has been approved.</p>
            <p style="font-size: 24px; font-weight: 600; color: #28a745;">+{points} points</p>
            <p>The points have been added to your balance. Keep it up!</p>"#,
        name = p.user_name,
        points = p.points
    );
    (
        format!("🎉 Submission approved! You earned {} points", p.points),
        layout("Submission Approved", "#28a745", &content),
    )
}

fn submission_rejected(p: &SubmissionRejected) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Thank you for your submission. Unfortunately it could not be approved.</p>
            <p><strong>Reason:</strong> {reason}</p>
            <p>You are welcome to submit again.</p>"#,
        name = p.user_name,
        reason = p.reason
    );
    (
        format!("Update on your submission: {}", p.reason),
        layout("Submission Update", "#6c757d", &content),
    )
}

fn cashout_details(p: &CashoutProgress, status: &str) -> String {
    format!(
        r#"            <table style="width: 100%; background: #f8f9fa; border-radius: 4px; padding: 15px;">
                <tr><td style="color: #666666;">Amount</td><td style="font-weight: 600;">{amount}</td></tr>
                <tr><td style="color: #666666;">Method</td><td style="font-weight: 600;">{method}</td></tr>
                <tr><td style="color: #666666;">Status</td><td style="font-weight: 600;">{status}</td></tr>
            </table>"#,
        amount = format_amount(p.amount),
        method = p.method,
    )
}

fn cashout_initiated(p: &CashoutProgress) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Your cash-out request has been received and is being processed.</p>
{details}
            <p>We will let you know as soon as the payment is sent.</p>"#,
        name = p.user_name,
        details = cashout_details(p, "Processing")
    );
    (
        format!(
            "Cash-out of {} via {} is Processing",
            format_amount(p.amount),
            p.method
        ),
        layout("Cash-out Processing", "#007bff", &content),
    )
}

fn cashout_completed(p: &CashoutProgress) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Your cash-out has been sent.</p>
{details}
            <p>Thanks for being part of the community!</p>"#,
        name = p.user_name,
        details = cashout_details(p, "Completed")
    );
    (
        format!(
            "Cash-out of {} via {} Completed",
            format_amount(p.amount),
            p.method
        ),
        layout("Cash-out Completed", "#28a745", &content),
    )
}

fn cashout_failed(p: &CashoutFailed) -> (String, String) {
    let content = format!(
        r#"            <p>Hi {name},</p>
            <p>Unfortunately your cash-out of <strong>{amount}</strong> could not be completed.</p>
            <p><strong>Reason:</strong> {reason}</p>
            <p>The points for this cash-out have been refunded to your balance.</p>"#,
        name = p.user_name,
        amount = format_amount(p.amount),
        reason = p.reason
    );
    (
        format!(
            "Cash-out of {} failed: points refunded",
            format_amount(p.amount)
        ),
        layout("Cash-out Failed", "#dc3545", &content),
    )
}
