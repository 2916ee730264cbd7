//! Advance payment model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Advance payment recorded against a reservation, pending verification
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdvancePayment {
    pub id: i32,
    pub reservation_id: i32,
    pub amount: Decimal,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub status: i16,
    pub created_at: DateTime<Utc>,
}
