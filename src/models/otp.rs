//! One-time password record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// OTP row keyed by (employee, purpose). At most one unverified row per
/// key exists: generation deletes prior unverified rows first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OtpRecord {
    pub id: i32,
    pub employee_id: i32,
    pub code: String,
    pub purpose: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: i16,
    pub max_attempts: i16,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(attempts: i16, expires_in: Duration) -> OtpRecord {
        let now = Utc::now();
        OtpRecord {
            id: 1,
            employee_id: 7,
            code: "042137".to_string(),
            purpose: "login".to_string(),
            expires_at: now + expires_in,
            attempts,
            max_attempts: 3,
            verified_at: None,
            created_at: now,
        }
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let now = Utc::now();
        let fresh = record(0, Duration::minutes(5));
        assert!(!fresh.is_expired(now));
        // Exactly at expires_at the code is no longer valid
        assert!(fresh.is_expired(fresh.expires_at));
        assert!(fresh.is_expired(fresh.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn expired_code_stays_expired_regardless_of_attempts() {
        let stale = record(0, Duration::minutes(-1));
        assert!(stale.is_expired(Utc::now()));
        assert!(!stale.attempts_exhausted());
    }

    #[test]
    fn attempts_exhaust_at_the_cap() {
        assert!(!record(0, Duration::minutes(5)).attempts_exhausted());
        assert!(!record(2, Duration::minutes(5)).attempts_exhausted());
        // The third failure consumes the budget; the fourth try is refused
        assert!(record(3, Duration::minutes(5)).attempts_exhausted());
        assert!(record(4, Duration::minutes(5)).attempts_exhausted());
    }
}
