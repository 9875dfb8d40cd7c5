//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning guest identity (JWT subject), null for unlinked records
    #[sea_orm(nullable)]
    pub guest_id: Option<String>,

    /// Display name captured from the identity provider at creation
    #[sea_orm(nullable)]
    pub guest_username: Option<String>,

    #[sea_orm(nullable)]
    pub first_name: Option<String>,

    #[sea_orm(nullable)]
    pub last_name: Option<String>,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    #[sea_orm(nullable)]
    pub mobile_number: Option<String>,

    pub date: Date,
    pub time: Time,
    pub guests: i32,
    pub special_request: String,

    /// Reservation status: pending, approved, cancelled, reschedule_requested
    pub status: String,

    #[sea_orm(nullable)]
    pub proposed_date: Option<Date>,

    #[sea_orm(nullable)]
    pub proposed_time: Option<Time>,

    pub guest_confirmed: bool,
    pub cancellation_fee_due: bool,

    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
