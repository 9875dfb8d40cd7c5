//! Application layer — use cases and status transition rules

pub mod dto;
pub mod reservation_service;
pub mod transitions;

pub use dto::{CreateReservation, UpdateReservation};
pub use reservation_service::{DashboardData, ReservationService};
