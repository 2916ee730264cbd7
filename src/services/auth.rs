//! Authentication and employee account service
//!
//! Login is two-step: password verification issues a login OTP; verifying
//! the OTP yields a JWT.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        employee::{CreateEmployee, Employee, EmployeeClaims},
        enums::OtpPurpose,
    },
    repository::Repository,
    services::{email::EmailService, otp::OtpService},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    otp: OtpService,
    email: EmailService,
}

impl AuthService {
    pub fn new(
        repository: Repository,
        config: AuthConfig,
        otp: OtpService,
        email: EmailService,
    ) -> Self {
        Self {
            repository,
            config,
            otp,
            email,
        }
    }

    /// First login step: verify credentials and issue a login OTP.
    /// Returns the employee whose OTP step is now pending.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Employee> {
        let employee = self
            .repository
            .employees
            .get_by_email(email)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid email or password".to_string())
            })?;

        if !self.verify_password(&employee, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        self.otp.generate(employee.id, OtpPurpose::Login).await?;

        Ok(employee)
    }

    /// Second login step: exchange a valid login OTP for a JWT
    pub async fn verify_login(&self, employee_id: i32, code: &str) -> AppResult<(String, Employee)> {
        self.otp
            .verify(employee_id, code, OtpPurpose::Login)
            .await?;

        let employee = self.repository.employees.get_by_id(employee_id).await?;
        let token = self.create_token(&employee)?;

        Ok((token, employee))
    }

    /// Issue a password-reset OTP for the account behind the email
    pub async fn forgot_password(&self, email: &str) -> AppResult<Employee> {
        let employee = self
            .repository
            .employees
            .get_by_email(email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No account found with this email address".to_string())
            })?;

        self.otp
            .generate(employee.id, OtpPurpose::PasswordReset)
            .await?;

        Ok(employee)
    }

    /// Verify a password-reset OTP and store the new password hash
    pub async fn reset_password(
        &self,
        employee_id: i32,
        code: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if new_password.len() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        self.otp
            .verify(employee_id, code, OtpPurpose::PasswordReset)
            .await?;

        let hash = self.hash_password(new_password)?;
        self.repository
            .employees
            .update_password(employee_id, &hash)
            .await?;

        Ok(())
    }

    /// Provision a new employee account and send the welcome email
    pub async fn create_employee(&self, employee: CreateEmployee) -> AppResult<Employee> {
        employee
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.employees.email_exists(&employee.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let hash = self.hash_password(&employee.password)?;
        let created = self.repository.employees.create(&employee, hash).await?;

        // Account creation stands even when the welcome email cannot be sent
        if let Err(e) = self
            .email
            .send_welcome(&created.email, &created.firstname)
            .await
        {
            tracing::warn!(employee_id = created.id, "Failed to send welcome email: {}", e);
        }

        Ok(created)
    }

    /// List employees
    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repository.employees.list().await
    }

    /// Get employee by ID
    pub async fn get_employee(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    /// Create JWT token for an employee
    fn create_token(&self, employee: &Employee) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = EmployeeClaims {
            sub: employee.email.clone(),
            employee_id: employee.id,
            role: employee.role(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify an employee password against the stored argon2 hash
    fn verify_password(&self, employee: &Employee, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&employee.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
