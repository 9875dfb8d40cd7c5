//! Reservation DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{CreateReservation, UpdateReservation};
use crate::domain::Reservation;

/// Reservation API representation.
///
/// `guest` and `guest_name` are read-only fields derived from the linked
/// identity; internal cancellation bookkeeping is not exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    /// Display name of the linked guest identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    /// ID of the linked guest identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    /// Scheduled date (ISO 8601)
    pub date: NaiveDate,
    /// Scheduled time
    pub time: NaiveTime,
    /// Party size
    pub guests: i32,
    pub special_request: String,
    /// `pending`, `approved`, `cancelled` or `reschedule_requested`
    pub status: String,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time: Option<NaiveTime>,
    pub guest_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            guest_name: r.guest.as_ref().map(|g| g.username.clone()),
            guest: r.guest.as_ref().map(|g| g.id.clone()),
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            mobile_number: r.mobile_number,
            date: r.date,
            time: r.time,
            guests: r.guests,
            special_request: r.special_request,
            status: r.status.to_string(),
            proposed_date: r.proposed_date,
            proposed_time: r.proposed_time,
            guest_confirmed: r.guest_confirmed,
            created_at: r.created_at,
        }
    }
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// Internationally formatted phone number (`+<country><number>`) for
    /// WhatsApp notifications
    pub mobile_number: Option<String>,
    /// Scheduled date (required)
    pub date: Option<NaiveDate>,
    /// Scheduled time (required)
    pub time: Option<NaiveTime>,
    /// Party size (required, > 0)
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub guests: Option<i32>,
    pub special_request: Option<String>,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            mobile_number: req.mobile_number,
            date: req.date,
            time: req.time,
            guests: req.guests,
            special_request: req.special_request,
        }
    }
}

/// Partial update request — pass only the fields to change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub guests: Option<i32>,
    pub special_request: Option<String>,
    /// New status: `pending`, `approved`, `cancelled`, `reschedule_requested`
    pub status: Option<String>,
    /// Proposed alternate date for a reschedule
    pub proposed_date: Option<NaiveDate>,
    /// Proposed alternate time for a reschedule
    pub proposed_time: Option<NaiveTime>,
}

impl From<UpdateReservationRequest> for UpdateReservation {
    fn from(req: UpdateReservationRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            mobile_number: req.mobile_number,
            date: req.date,
            time: req.time,
            guests: req.guests,
            special_request: req.special_request,
            status: req.status,
            proposed_date: req.proposed_date,
            proposed_time: req.proposed_time,
        }
    }
}

/// List query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsParams {
    /// Filter by status (case-insensitive)
    pub status: Option<String>,
}

/// Dashboard aggregation: all reservations grouped by status,
/// empty groups included
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub pending: Vec<ReservationDto>,
    pub approved: Vec<ReservationDto>,
    pub reschedule_requested: Vec<ReservationDto>,
    pub cancelled: Vec<ReservationDto>,
}
