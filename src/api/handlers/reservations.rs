//! Reservation REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::{error_status, AppState};
use crate::api::dto::{
    ApiResponse, CreateReservationRequest, ListReservationsParams, ReservationDto,
    UpdateReservationRequest,
};
use crate::domain::{RequestIdentity, ReservationStatus};

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message.into())),
    )
}

/// Create a reservation
///
/// The reservation is linked to the authenticated guest and always starts
/// out `pending`.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), HandlerError> {
    request.validate().map_err(|e| bad_request(e.to_string()))?;

    match state.service.create(request.into(), &identity).await {
        Ok(reservation) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ReservationDto::from(reservation))),
        )),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// List reservations in creation order
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ListReservationsParams),
    responses(
        (status = 200, description = "Reservation list", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<ListReservationsParams>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, HandlerError> {
    let status = match params.status.as_deref() {
        Some(s) => Some(
            ReservationStatus::parse(s)
                .ok_or_else(|| bad_request(format!("status: unknown value '{}'", s)))?,
        ),
        None => None,
    };

    match state.service.list(status).await {
        Ok(reservations) => Ok(Json(ApiResponse::success(
            reservations.into_iter().map(ReservationDto::from).collect(),
        ))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// Fetch a single reservation
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, HandlerError> {
    match state.service.get(id).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// Partial update (staff workflows: approve, cancel, propose reschedule)
///
/// Status changes trigger guest notifications; cancellations inside the
/// 24-hour window mark the cancellation fee.
#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, HandlerError> {
    request.validate().map_err(|e| bad_request(e.to_string()))?;

    match state.service.update(id, request.into()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// Guest confirmation of a staff-proposed reschedule
///
/// Only the reservation owner may confirm. Approves the reservation and
/// sends the confirmed-after-reschedule WhatsApp message.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/confirm-reschedule",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reschedule confirmed", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the reservation owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn confirm_reschedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(identity): Extension<RequestIdentity>,
) -> Result<Json<ApiResponse<ReservationDto>>, HandlerError> {
    match state.service.confirm_reschedule(id, &identity).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
