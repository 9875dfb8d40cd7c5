//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, DomainResult, GuestRef, Reservation, ReservationRepository, ReservationStatus,
};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    let guest = match (m.guest_id, m.guest_username) {
        (Some(id), username) => Some(GuestRef {
            id,
            username: username.unwrap_or_default(),
        }),
        _ => None,
    };
    Reservation {
        id: m.id,
        guest,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        mobile_number: m.mobile_number,
        date: m.date,
        time: m.time,
        guests: m.guests,
        special_request: m.special_request,
        // A stored status always comes from the enum; anything else means a
        // manual edit, read back as pending
        status: ReservationStatus::parse(&m.status).unwrap_or(ReservationStatus::Pending),
        proposed_date: m.proposed_date,
        proposed_time: m.proposed_time,
        guest_confirmed: m.guest_confirmed,
        cancellation_fee_due: m.cancellation_fee_due,
        cancelled_at: m.cancelled_at,
        created_at: m.created_at,
    }
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id),
        guest_id: Set(r.guest.as_ref().map(|g| g.id.clone())),
        guest_username: Set(r.guest.as_ref().map(|g| g.username.clone())),
        first_name: Set(r.first_name.clone()),
        last_name: Set(r.last_name.clone()),
        email: Set(r.email.clone()),
        mobile_number: Set(r.mobile_number.clone()),
        date: Set(r.date),
        time: Set(r.time),
        guests: Set(r.guests),
        special_request: Set(r.special_request.clone()),
        status: Set(r.status.as_str().to_string()),
        proposed_date: Set(r.proposed_date),
        proposed_time: Set(r.proposed_time),
        guest_confirmed: Set(r.guest_confirmed),
        cancellation_fee_due: Set(r.cancellation_fee_due),
        cancelled_at: Set(r.cancelled_at),
        created_at: Set(r.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Inserting reservation for {:?}", r.guest);

        let mut model = domain_to_active(&r);
        model.id = NotSet;
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn update(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Updating reservation: {}", r.id);

        let existing = reservation::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: r.id.to_string(),
            });
        }

        let saved = domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self, status: Option<ReservationStatus>) -> DomainResult<Vec<Reservation>> {
        let mut query =
            reservation::Entity::find().order_by_asc(reservation::Column::Id);
        if let Some(status) = status {
            query = query.filter(reservation::Column::Status.eq(status.as_str()));
        }
        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
