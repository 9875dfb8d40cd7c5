//! In-memory repository implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Reservation, ReservationRepository, ReservationStatus,
};

/// In-memory reservation store for development and testing
pub struct MemoryReservationRepository {
    reservations: DashMap<i32, Reservation>,
    id_counter: AtomicI32,
}

impl MemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }
}

impl Default for MemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn insert(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        reservation.id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        self.reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id.to_string(),
            });
        }
        self.reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self, status: Option<ReservationStatus>) -> DomainResult<Vec<Reservation>> {
        let mut all: Vec<Reservation> = self
            .reservations
            .iter()
            .map(|e| e.value().clone())
            .filter(|r| status.map_or(true, |s| r.status == s))
            .collect();
        // IDs are monotonic, so id order is insertion order
        all.sort_by_key(|r| r.id);
        Ok(all)
    }
}
