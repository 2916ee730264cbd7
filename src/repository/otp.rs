//! OTP codes repository

use chrono::{DateTime, Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{enums::OtpPurpose, otp::OtpRecord},
};

/// Codes expire five minutes after issue
pub const OTP_TTL_MINUTES: i64 = 5;
/// Verification attempts allowed per code
pub const OTP_MAX_ATTEMPTS: i16 = 3;

#[derive(Clone)]
pub struct OtpRepository {
    pool: Pool<Postgres>,
}

impl OtpRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Delete any unverified codes for the (employee, purpose) key.
    /// Generation supersedes: at most one unverified row per key exists.
    pub async fn delete_unverified(&self, employee_id: i32, purpose: OtpPurpose) -> AppResult<()> {
        sqlx::query(
            "DELETE FROM otp_codes WHERE employee_id = $1 AND purpose = $2 AND verified_at IS NULL",
        )
        .bind(employee_id)
        .bind(purpose.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a fresh code with the standard expiry and attempt budget
    pub async fn insert(
        &self,
        employee_id: i32,
        code: &str,
        purpose: OtpPurpose,
    ) -> AppResult<OtpRecord> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(OTP_TTL_MINUTES);

        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            INSERT INTO otp_codes
                (employee_id, code, purpose, expires_at, attempts, max_attempts, created_at)
            VALUES ($1, $2, $3, $4, 0, $5, $6)
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(code)
        .bind(purpose.as_str())
        .bind(expires_at)
        .bind(OTP_MAX_ATTEMPTS)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Latest unverified code for the key, expired or not. The caller
    /// distinguishes "expired" from "none ever requested".
    pub async fn latest_unverified(
        &self,
        employee_id: i32,
        purpose: OtpPurpose,
    ) -> AppResult<Option<OtpRecord>> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            SELECT * FROM otp_codes
            WHERE employee_id = $1 AND purpose = $2 AND verified_at IS NULL
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Record a failed attempt; returns the new attempt count
    pub async fn increment_attempts(&self, id: i32) -> AppResult<i16> {
        let attempts: i16 = sqlx::query_scalar(
            "UPDATE otp_codes SET attempts = attempts + 1 WHERE id = $1 RETURNING attempts",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(attempts)
    }

    /// Record a successful attempt: stamps verified_at and counts the attempt
    pub async fn mark_verified(&self, id: i32, verified_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE otp_codes SET verified_at = $1, attempts = attempts + 1 WHERE id = $2",
        )
        .bind(verified_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
