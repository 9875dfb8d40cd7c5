//! API DTOs

pub mod common;
pub mod reservation;

pub use common::{ApiResponse, EmptyData};
pub use reservation::{
    CreateReservationRequest, DashboardResponse, ListReservationsParams, ReservationDto,
    UpdateReservationRequest,
};
