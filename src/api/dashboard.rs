//! Role-specific dashboard endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::dashboard::{AdminDashboard, FrontDeskDashboard, HandymanDashboard},
};

use super::AuthenticatedEmployee;

/// Property-wide snapshot for administrators
#[utoipa::path(
    get,
    path = "/dashboard/admin",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboard),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn admin_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<AdminDashboard>> {
    claims.require_admin()?;

    let dashboard = state.services.dashboard.admin().await?;
    Ok(Json(dashboard))
}

/// Today's arrivals, departures and unassigned bookings
#[utoipa::path(
    get,
    path = "/dashboard/front-desk",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Front desk dashboard", body = FrontDeskDashboard),
        (status = 403, description = "Front desk role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn front_desk_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<FrontDeskDashboard>> {
    claims.require_front_desk()?;

    let dashboard = state.services.dashboard.front_desk().await?;
    Ok(Json(dashboard))
}

/// Open task list for the authenticated maintenance employee
#[utoipa::path(
    get,
    path = "/dashboard/handyman",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Handyman dashboard", body = HandymanDashboard),
        (status = 403, description = "Maintenance role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn handyman_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<HandymanDashboard>> {
    claims.require_maintenance_access()?;

    let dashboard = state.services.dashboard.handyman(claims.employee_id).await?;
    Ok(Json(dashboard))
}
