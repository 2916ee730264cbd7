//! Authentication and employee account endpoints
//!
//! Login is a two-step flow: `/auth/login` checks credentials and emails
//! a one-time code; `/auth/verify-otp` exchanges the code for a JWT.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        employee::{CreateEmployee, EmployeeInfo},
        enums::OtpPurpose,
    },
};

use super::AuthenticatedEmployee;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// First login step succeeded; the OTP step is pending
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub employee_id: i32,
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub employee_id: i32,
    pub code: String,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub token: String,
    pub employee: EmployeeInfo,
}

#[derive(Deserialize, ToSchema)]
pub struct ResendOtpRequest {
    pub employee_id: i32,
    /// "login" or "password_reset"; defaults to login
    pub purpose: Option<OtpPurpose>,
}

#[derive(Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub employee_id: i32,
    pub code: String,
    pub new_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Check credentials and email a login code
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Verification code sent", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let employee = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        employee_id: employee.id,
        message: "A verification code has been sent to your email".to_string(),
    }))
}

/// Exchange a login code for a JWT
#[utoipa::path(
    post,
    path = "/auth/verify-otp",
    tag = "auth",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Login complete", body = VerifyOtpResponse),
        (status = 401, description = "Invalid or expired code", body = crate::error::ErrorResponse)
    )
)]
pub async fn verify_otp(
    State(state): State<crate::AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> AppResult<Json<VerifyOtpResponse>> {
    let (token, employee) = state
        .services
        .auth
        .verify_login(request.employee_id, &request.code)
        .await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        token,
        employee: employee.into(),
    }))
}

/// Re-issue a verification code
#[utoipa::path(
    post,
    path = "/auth/resend-otp",
    tag = "auth",
    request_body = ResendOtpRequest,
    responses(
        (status = 200, description = "Code re-sent", body = MessageResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn resend_otp(
    State(state): State<crate::AppState>,
    Json(request): Json<ResendOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let purpose = request.purpose.unwrap_or(OtpPurpose::Login);
    state
        .services
        .otp
        .resend(request.employee_id, purpose)
        .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "A new verification code has been sent to your email".to_string(),
    }))
}

/// Start a password reset by emailing a reset code
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset code sent", body = LoginResponse),
        (status = 404, description = "No account for this email", body = crate::error::ErrorResponse)
    )
)]
pub async fn forgot_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<LoginResponse>> {
    let employee = state.services.auth.forgot_password(&request.email).await?;

    Ok(Json(LoginResponse {
        success: true,
        employee_id: employee.id,
        message: "A password reset code has been sent to your email".to_string(),
    }))
}

/// Complete a password reset with the emailed code
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid or expired code", body = crate::error::ErrorResponse)
    )
)]
pub async fn reset_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .auth
        .reset_password(request.employee_id, &request.code, &request.new_password)
        .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Password has been reset".to_string(),
    }))
}

/// Current employee from the JWT
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current employee", body = EmployeeInfo),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<EmployeeInfo>> {
    let employee = state.services.auth.get_employee(claims.employee_id).await?;
    Ok(Json(employee.into()))
}

/// List employee accounts
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee list", body = [EmployeeInfo]),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_employees(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
) -> AppResult<Json<Vec<EmployeeInfo>>> {
    claims.require_admin()?;

    let employees = state.services.auth.list_employees().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// Get one employee account
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = EmployeeInfo),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<EmployeeInfo>> {
    claims.require_admin()?;

    let employee = state.services.auth.get_employee(id).await?;
    Ok(Json(employee.into()))
}

/// Provision a new employee account
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeInfo),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Json(employee): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<EmployeeInfo>)> {
    claims.require_admin()?;

    let created = state.services.auth.create_employee(employee).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
