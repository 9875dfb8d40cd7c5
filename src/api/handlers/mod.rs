//! REST API handlers

pub mod dashboard;
pub mod health;
pub mod reservations;

use std::sync::Arc;

use axum::http::StatusCode;

use crate::application::ReservationService;
use crate::domain::DomainError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReservationService>,
}

/// Map a domain error onto its HTTP status.
///
/// Repository failures are wrapped as `Validation("Database error: ...")`
/// and must not surface as client errors.
pub(crate) fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(msg) if msg.starts_with("Database error:") => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    }
}
