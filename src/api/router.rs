//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{
    ApiResponse, CreateReservationRequest, DashboardResponse, ReservationDto,
    UpdateReservationRequest,
};
use crate::api::handlers::{dashboard, health, reservations, AppState};
use crate::application::ReservationService;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::auth::JwtConfig;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::confirm_reschedule,
        dashboard::get_dashboard_data,
    ),
    components(
        schemas(
            ApiResponse<ReservationDto>,
            ApiResponse<Vec<ReservationDto>>,
            ApiResponse<DashboardResponse>,
            ReservationDto,
            CreateReservationRequest,
            UpdateReservationRequest,
            DashboardResponse,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness. Use for availability monitoring."),
        (name = "Reservations", description = "Guest reservation lifecycle: create, list, inspect, staff updates (approve / cancel / propose reschedule) and guest reschedule confirmation. Statuses: `pending`, `approved`, `cancelled`, `reschedule_requested`."),
        (name = "Dashboard", description = "Staff-only aggregation of all reservations grouped by status."),
    ),
    info(
        title = "Dinner Reservation API",
        version = "1.0.0",
        description = "REST API for the restaurant reservation system. \
            Authenticate with a JWT bearer token issued by the identity \
            provider and pass it as `Authorization: Bearer <token>`. \
            All responses are wrapped in `{\"success\": bool, \"data\": ..., \"error\": ...}`."
    )
)]
struct ApiDoc;

/// Build the application router: authenticated reservation + dashboard
/// routes, the open health probe, and Swagger UI at `/docs`.
pub fn create_api_router(service: Arc<ReservationService>, jwt_config: JwtConfig) -> Router {
    let state = AppState { service };
    let auth_state = AuthState { jwt_config };

    let protected = Router::new()
        .route(
            "/api/v1/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(reservations::get_reservation).patch(reservations::update_reservation),
        )
        .route(
            "/api/v1/reservations/{id}/confirm-reschedule",
            post(reservations::confirm_reschedule),
        )
        .route("/api/v1/dashboard-data", get(dashboard::get_dashboard_data))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
