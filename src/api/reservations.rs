//! Reservation and booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        maintenance::PaginationMeta,
        payment::AdvancePayment,
        reservation::{
            AvailabilityQuery, AvailabilityResponse, BookingRequest, BookingResponse,
            ReservationDetails, ReservationQuery, UpdateReservationStatus,
        },
    },
};

use super::AuthenticatedEmployee;

/// Envelope for paginated list endpoints
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Deserialize, ToSchema)]
pub struct AssignRoomRequest {
    pub room_id: i32,
}

/// Book a stay for a specific room or a room type.
///
/// All writes happen in one transaction; on any failure nothing is
/// recorded and the room availability is unchanged.
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Validation or business rule failure", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown room or room type", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Json(request): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    claims.require_front_desk()?;

    let response = state.services.bookings.create_booking(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Count rooms of a type free over an interval
#[utoipa::path(
    get,
    path = "/reservations/availability",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available room count", body = AvailabilityResponse),
        (status = 404, description = "Unknown room type", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    claims.require_front_desk()?;

    let available_count = state.services.bookings.check_availability(&query).await?;
    Ok(Json(AvailabilityResponse {
        success: true,
        available_count,
    }))
}

/// List reservations with filters and pagination
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(ReservationQuery),
    responses(
        (status = 200, description = "Reservation list", body = PaginatedResponse<ReservationDetails>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<PaginatedResponse<ReservationDetails>>> {
    claims.require_front_desk()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let (reservations, total) = state.services.bookings.list(&query).await?;

    Ok(Json(PaginatedResponse {
        success: true,
        data: reservations,
        pagination: PaginationMeta::new(page, per_page, total),
    }))
}

/// Get one reservation with customer and room context
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDetails),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationDetails>> {
    claims.require_front_desk()?;

    let reservation = state.services.bookings.get(id).await?;
    Ok(Json(reservation))
}

/// Advance payments recorded against a reservation
#[utoipa::path(
    get,
    path = "/reservations/{id}/payments",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Advance payments", body = [AdvancePayment]),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_reservation_payments(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AdvancePayment>>> {
    claims.require_front_desk()?;

    let payments = state.services.bookings.payments(id).await?;
    Ok(Json(payments))
}

/// Transition a reservation's status.
///
/// Assigned room statuses follow the reservation: confirmed reserves
/// them, check-in occupies them, check-out and cancellation free them.
#[utoipa::path(
    put,
    path = "/reservations/{id}/status",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationStatus,
    responses(
        (status = 200, description = "Status updated", body = ReservationDetails),
        (status = 400, description = "Unknown status code", body = crate::error::ErrorResponse),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_reservation_status(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(update): Json<UpdateReservationStatus>,
) -> AppResult<Json<ReservationDetails>> {
    claims.require_front_desk()?;

    state
        .services
        .bookings
        .update_status(id, update.status)
        .await?;
    let reservation = state.services.bookings.get(id).await?;
    Ok(Json(reservation))
}

/// Assign a concrete room to a room-type reservation
#[utoipa::path(
    put,
    path = "/reservations/{id}/assign-room",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = AssignRoomRequest,
    responses(
        (status = 200, description = "Room assigned", body = ReservationDetails),
        (status = 400, description = "Room unavailable or wrong type", body = crate::error::ErrorResponse),
        (status = 404, description = "Reservation or room not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn assign_room(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(request): Json<AssignRoomRequest>,
) -> AppResult<Json<ReservationDetails>> {
    claims.require_front_desk()?;

    state
        .services
        .bookings
        .assign_room(id, request.room_id)
        .await?;
    let reservation = state.services.bookings.get(id).await?;
    Ok(Json(reservation))
}
