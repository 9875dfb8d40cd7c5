//! Notifications module
//!
//! Message types and the outbound gateway port. The status transition
//! processor (`application::transitions`) produces [`NotificationRequest`]
//! intents; the reservation service dispatches them through a
//! [`NotificationGateway`] after the triggering save has been persisted.

pub mod gateway;
pub mod messages;

pub use gateway::{LogNotificationGateway, NotificationGateway};
pub use messages::{EmailMessage, NotificationRequest, WhatsAppMessage};
