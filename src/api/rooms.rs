//! Room and room type endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::room::{Room, RoomQuery, RoomType, RoomWithType, UpdateRoomStatus},
};

use super::AuthenticatedEmployee;

/// List rooms with their type details
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(RoomQuery),
    responses(
        (status = 200, description = "Room list", body = [RoomWithType]),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_rooms(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<Vec<RoomWithType>>> {
    claims.require_front_desk()?;

    let rooms = state.services.rooms.list(&query).await?;
    Ok(Json(rooms))
}

/// List room types
#[utoipa::path(
    get,
    path = "/room-types",
    tag = "rooms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Room type list", body = [RoomType]),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_room_types(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<Vec<RoomType>>> {
    claims.require_front_desk()?;

    let types = state.services.rooms.list_types().await?;
    Ok(Json(types))
}

/// Manually override a room's status
#[utoipa::path(
    put,
    path = "/rooms/{id}/status",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomStatus,
    responses(
        (status = 200, description = "Status updated", body = Room),
        (status = 400, description = "Unknown status code", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_room_status(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(update): Json<UpdateRoomStatus>,
) -> AppResult<Json<Room>> {
    claims.require_front_desk()?;

    let room = state.services.rooms.update_status(id, update.status).await?;
    Ok(Json(room))
}
