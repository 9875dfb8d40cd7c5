//! Staff dashboard endpoint

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::{error_status, AppState};
use crate::api::dto::{ApiResponse, DashboardResponse, ReservationDto};
use crate::domain::{RequestIdentity, Reservation};

/// Dashboard aggregation
///
/// Groups all reservations by status. Restricted to staff identities;
/// read-only.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard-data",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservations grouped by status", body = ApiResponse<DashboardResponse>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn get_dashboard_data(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> Result<Json<ApiResponse<DashboardResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.dashboard(&identity).await {
        Ok(data) => {
            fn to_dtos(items: Vec<Reservation>) -> Vec<ReservationDto> {
                items.into_iter().map(ReservationDto::from).collect()
            }
            Ok(Json(ApiResponse::success(DashboardResponse {
                pending: to_dtos(data.pending),
                approved: to_dtos(data.approved),
                reschedule_requested: to_dtos(data.reschedule_requested),
                cancelled: to_dtos(data.cancelled),
            })))
        }
        Err(e) => Err((error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
