//! Domain layer — core business entities, types and traits

pub mod error;
pub mod identity;
pub mod reservation;

pub use error::{DomainError, DomainResult};
pub use identity::RequestIdentity;
pub use reservation::{GuestRef, Reservation, ReservationRepository, ReservationStatus};
