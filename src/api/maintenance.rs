//! Maintenance log endpoints
//!
//! Creating, updating and deleting a log also moves the affected room
//! through the matching status, so front desk always sees current
//! room availability.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenanceLog, MaintenanceLog, MaintenanceLogDetails, MaintenanceLogQuery,
        MaintenanceStatusEntry, UpdateMaintenanceLog,
    },
};

use super::{reservations::PaginatedResponse, AuthenticatedEmployee};

/// List maintenance logs with filters and pagination
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(MaintenanceLogQuery),
    responses(
        (status = 200, description = "Maintenance log list", body = PaginatedResponse<MaintenanceLogDetails>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_maintenance_logs(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Query(query): Query<MaintenanceLogQuery>,
) -> AppResult<Json<PaginatedResponse<MaintenanceLogDetails>>> {
    claims.require_maintenance_access()?;

    let (logs, pagination) = state.services.maintenance.list(&query).await?;

    Ok(Json(PaginatedResponse {
        success: true,
        data: logs,
        pagination,
    }))
}

/// Get one maintenance log
#[utoipa::path(
    get,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance log ID")),
    responses(
        (status = 200, description = "Maintenance log", body = MaintenanceLog),
        (status = 404, description = "Log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_maintenance_log(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceLog>> {
    claims.require_maintenance_access()?;

    let log = state.services.maintenance.get(id).await?;
    Ok(Json(log))
}

/// Open a maintenance log for a room
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceLog,
    responses(
        (status = 201, description = "Log created", body = MaintenanceLog),
        (status = 400, description = "Unknown status code", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance_log(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Json(log): Json<CreateMaintenanceLog>,
) -> AppResult<(StatusCode, Json<MaintenanceLog>)> {
    claims.require_maintenance_access()?;

    let created = state.services.maintenance.create(log).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a maintenance log
#[utoipa::path(
    put,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance log ID")),
    request_body = UpdateMaintenanceLog,
    responses(
        (status = 200, description = "Log updated", body = MaintenanceLog),
        (status = 400, description = "No fields to update", body = crate::error::ErrorResponse),
        (status = 404, description = "Log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_maintenance_log(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(update): Json<UpdateMaintenanceLog>,
) -> AppResult<Json<MaintenanceLog>> {
    claims.require_maintenance_access()?;

    let updated = state.services.maintenance.update(id, update).await?;
    Ok(Json(updated))
}

/// Delete a maintenance log
#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance log ID")),
    responses(
        (status = 204, description = "Log deleted"),
        (status = 404, description = "Log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_maintenance_log(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_maintenance_access()?;

    state.services.maintenance.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The selectable maintenance statuses
#[utoipa::path(
    get,
    path = "/maintenance/statuses",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status list", body = [MaintenanceStatusEntry]),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_maintenance_statuses(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<Vec<MaintenanceStatusEntry>>> {
    claims.require_maintenance_access()?;

    Ok(Json(state.services.maintenance.statuses()))
}
