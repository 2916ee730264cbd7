//! API handlers for Veranda REST endpoints

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod reservations;
pub mod rooms;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::employee::EmployeeClaims, AppState};

/// Extractor for the authenticated employee behind a Bearer JWT
pub struct AuthenticatedEmployee(pub EmployeeClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedEmployee {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let claims = EmployeeClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedEmployee(claims))
    }
}
