//! One-time password service
//!
//! State machine per (employee, purpose): none -> pending -> verified,
//! with expiry and an attempt cap as terminal failures. A new `generate`
//! call supersedes any unverified code for the same key.

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::enums::OtpPurpose,
    repository::{
        otp::OTP_MAX_ATTEMPTS,
        Repository,
    },
    services::email::EmailService,
};

#[derive(Clone)]
pub struct OtpService {
    repository: Repository,
    email: EmailService,
}

impl OtpService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// Issue a fresh code for the key and send it by email.
    /// An email failure fails the whole operation.
    pub async fn generate(&self, employee_id: i32, purpose: OtpPurpose) -> AppResult<()> {
        let employee = self.repository.employees.get_by_id(employee_id).await?;

        self.repository
            .otp
            .delete_unverified(employee_id, purpose)
            .await?;

        let code = generate_code();
        self.repository
            .otp
            .insert(employee_id, &code, purpose)
            .await?;

        self.email
            .send_otp_code(&employee.email, &code, purpose)
            .await?;

        tracing::info!(employee_id, purpose = %purpose, "OTP issued");

        Ok(())
    }

    /// Verify a code. Every attempt, match or not, increments the attempt
    /// counter exactly once; verification is terminal.
    pub async fn verify(&self, employee_id: i32, code: &str, purpose: OtpPurpose) -> AppResult<()> {
        let now = Utc::now();

        let record = self
            .repository
            .otp
            .latest_unverified(employee_id, purpose)
            .await?
            .ok_or_else(|| {
                AppError::Authentication(
                    "No verification code found. Please request a new code.".to_string(),
                )
            })?;

        if record.is_expired(now) {
            return Err(AppError::Authentication(
                "Verification code has expired. Please request a new code.".to_string(),
            ));
        }

        if record.attempts_exhausted() {
            return Err(AppError::Authentication(
                "Maximum verification attempts exceeded. Please request a new code.".to_string(),
            ));
        }

        // Codes are opaque strings: leading zeros matter
        if record.code != code {
            let attempts = self.repository.otp.increment_attempts(record.id).await?;
            let remaining = (OTP_MAX_ATTEMPTS - attempts).max(0);
            return Err(AppError::Authentication(format!(
                "Invalid verification code. {} attempts remaining",
                remaining
            )));
        }

        self.repository.otp.mark_verified(record.id, now).await?;

        tracing::info!(employee_id, purpose = %purpose, "OTP verified");

        Ok(())
    }

    /// Re-issue a code; identical to `generate`
    pub async fn resend(&self, employee_id: i32, purpose: OtpPurpose) -> AppResult<()> {
        self.generate(employee_id, purpose).await
    }
}

/// Six-digit zero-padded code, uniform in [100000, 999999]
fn generate_code() -> String {
    let code = rand::thread_rng().gen_range(100_000..=999_999);
    format!("{:06}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }
}
