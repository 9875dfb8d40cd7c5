//! Notification gateway port
//!
//! The transports (SMTP relay, WhatsApp Business API) are external
//! collaborators behind this narrow interface. Implementations log and
//! swallow delivery problems — a send never raises into the caller, so a
//! failed notification can never roll back the status change that
//! triggered it.

use async_trait::async_trait;
use tracing::info;

use super::messages::{EmailMessage, WhatsAppMessage};

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver an email, best-effort
    async fn send_email(&self, message: &EmailMessage);

    /// Deliver a WhatsApp message, best-effort
    async fn send_whatsapp(&self, message: &WhatsAppMessage);
}

/// Gateway for development and local testing: logs every message instead
/// of delivering it.
pub struct LogNotificationGateway;

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn send_email(&self, message: &EmailMessage) {
        info!(
            to = %message.to,
            subject = %message.subject,
            "email notification (log transport): {}",
            message.body
        );
    }

    async fn send_whatsapp(&self, message: &WhatsAppMessage) {
        info!(
            to = %message.to,
            "whatsapp notification (log transport): {}",
            message.body
        );
    }
}
