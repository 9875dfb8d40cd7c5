//! Application-layer input data for reservation operations

use chrono::{NaiveDate, NaiveTime};

/// Fields accepted when creating a reservation.
///
/// Required-field checks (date, time, guests) happen in the service so the
/// error carries field-level detail; everything else is optional.
#[derive(Debug, Clone, Default)]
pub struct CreateReservation {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: Option<i32>,
    pub special_request: Option<String>,
}

/// Partial update. Absent fields are left untouched; `status` is parsed
/// case-insensitively and rejected with a validation error when unknown.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: Option<i32>,
    pub special_request: Option<String>,
    pub status: Option<String>,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time: Option<NaiveTime>,
}
