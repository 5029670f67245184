//! Transactional email built from domain events.
//!
//! Notifications never fail the request that triggered them: delivery errors are
//! logged and dropped.

use crate::server::{
    email::{EmailMessage, EmailSender},
    model::{order::Order, support::SupportTicket, user::User},
};

pub struct Notifier<'a> {
    email: &'a dyn EmailSender,
}

impl<'a> Notifier<'a> {
    pub fn new(email: &'a dyn EmailSender) -> Self {
        Self { email }
    }

    pub async fn welcome(&self, user: &User) {
        let name = user.display_name.as_deref().unwrap_or(&user.username);
        self.deliver(EmailMessage {
            to: user.email.clone(),
            subject: "Welcome to Forja".to_string(),
            body: format!(
                "Hi {},\n\nYour Forja account '{}' is ready.",
                name, user.username
            ),
        })
        .await;
    }

    /// Receipt for a paid order.
    pub async fn order_paid(&self, user: &User, order: &Order) {
        self.deliver(EmailMessage {
            to: user.email.clone(),
            subject: format!("Receipt for order #{}", order.id),
            body: format!(
                "Thanks for your purchase!\n\nOrder #{}: {} item(s), total {}.\nYour games are now in your library.",
                order.id,
                order.items.len(),
                format_cents(order.total_cents)
            ),
        })
        .await;
    }

    pub async fn ticket_status_changed(&self, owner: &User, ticket: &SupportTicket) {
        self.deliver(EmailMessage {
            to: owner.email.clone(),
            subject: format!("Support ticket #{} is now {}", ticket.id, ticket.status),
            body: format!(
                "Your support ticket '{}' changed status to {}.",
                ticket.subject, ticket.status
            ),
        })
        .await;
    }

    async fn deliver(&self, message: EmailMessage) {
        let to = message.to.clone();
        if let Err(err) = self.email.send(message).await {
            tracing::warn!("Failed to send email to {}: {}", to, err);
        }
    }
}

/// Formats an amount in cents as `12.34`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
