//! # Dinner Reservation Service
//!
//! Restaurant reservation management backend: guests create reservation
//! requests, staff approve/reschedule/cancel them, and notifications
//! (email, WhatsApp) fire on status changes.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Use cases and the status transition processor
//! - **notifications**: Outbound notification gateway port and messages
//! - **infrastructure**: External concerns (database, storage)
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT verification middleware

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmReservationRepository};

// Re-export API router
pub use api::create_api_router;
