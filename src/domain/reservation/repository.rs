//! Reservation repository interface

use async_trait::async_trait;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation and return it with its assigned ID
    async fn insert(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Update an existing reservation
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Find all reservations in insertion (creation) order, optionally
    /// filtered by status
    async fn find_all(&self, status: Option<ReservationStatus>) -> DomainResult<Vec<Reservation>>;
}
