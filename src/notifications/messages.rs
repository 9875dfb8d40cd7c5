//! Notification message types

/// Rendered email, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Rendered WhatsApp message. `to` is an internationally formatted phone
/// number with a leading `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppMessage {
    pub to: String,
    pub body: String,
}

/// A notification intent produced by the status transition processor.
///
/// Dispatch happens after the status change is persisted; delivery is
/// at-most-once best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationRequest {
    Email(EmailMessage),
    WhatsApp(WhatsAppMessage),
}

impl NotificationRequest {
    pub fn is_whatsapp(&self) -> bool {
        matches!(self, Self::WhatsApp(_))
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Self::Email(_))
    }
}
