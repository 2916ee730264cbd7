//! Employee model, JWT claims, and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::EmployeeRole;
use crate::error::AppError;

/// Employee model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn role(&self) -> EmployeeRole {
        self.role.clone().into()
    }
}

/// Public view of an employee (no credentials)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeInfo {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRole,
    pub is_active: bool,
}

impl From<Employee> for EmployeeInfo {
    fn from(e: Employee) -> Self {
        let role = e.role();
        Self {
            id: e.id,
            firstname: e.firstname,
            lastname: e.lastname,
            email: e.email,
            phone: e.phone,
            role,
            is_active: e.is_active,
        }
    }
}

/// Create employee request (account provisioning)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Firstname is required"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "Lastname is required"))]
    pub lastname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: EmployeeRole,
}

/// JWT Claims for authenticated employees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeClaims {
    pub sub: String,
    pub employee_id: i32,
    pub role: EmployeeRole,
    pub exp: i64,
    pub iat: i64,
}

impl EmployeeClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == EmployeeRole::Admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Admin role required".to_string(),
            ))
        }
    }

    /// Front-desk operations: reservations, rooms, payments
    pub fn require_front_desk(&self) -> Result<(), AppError> {
        match self.role {
            EmployeeRole::Admin | EmployeeRole::FrontDesk => Ok(()),
            _ => Err(AppError::Authorization(
                "Front desk role required".to_string(),
            )),
        }
    }

    /// Maintenance operations
    pub fn require_maintenance_access(&self) -> Result<(), AppError> {
        match self.role {
            EmployeeRole::Admin | EmployeeRole::Handyman => Ok(()),
            _ => Err(AppError::Authorization(
                "Maintenance role required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip_through_token() {
        let claims = EmployeeClaims {
            sub: "desk@veranda.example".to_string(),
            employee_id: 7,
            role: EmployeeRole::FrontDesk,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = claims.create_token("test-secret").unwrap();
        let parsed = EmployeeClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.employee_id, 7);
        assert_eq!(parsed.role, EmployeeRole::FrontDesk);
        assert!(EmployeeClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn role_checks() {
        let mut claims = EmployeeClaims {
            sub: "x".to_string(),
            employee_id: 1,
            role: EmployeeRole::Handyman,
            exp: 0,
            iat: 0,
        };
        assert!(claims.require_admin().is_err());
        assert!(claims.require_front_desk().is_err());
        assert!(claims.require_maintenance_access().is_ok());

        claims.role = EmployeeRole::Admin;
        assert!(claims.require_admin().is_ok());
        assert!(claims.require_front_desk().is_ok());
        assert!(claims.require_maintenance_access().is_ok());
    }
}
