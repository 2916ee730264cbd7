//! Maintenance log models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::MaintenanceStatus;

/// Maintenance log model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceLog {
    pub id: i32,
    pub room_id: i32,
    pub status: i16,
    pub assigned_to: Option<i32>,
    pub scheduled_date: NaiveDate,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Maintenance log with room context, for listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceLogDetails {
    pub id: i32,
    pub room_id: i32,
    pub room_number: String,
    pub status: i16,
    pub assigned_to: Option<i32>,
    pub assigned_to_name: Option<String>,
    pub scheduled_date: NaiveDate,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub cost: Option<Decimal>,
}

/// Create maintenance log request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenanceLog {
    pub room_id: i32,
    /// Maintenance status code (1 pending, 2 in progress, 3 completed)
    pub status: i16,
    pub assigned_to: Option<i32>,
    pub notes: Option<String>,
}

/// Update maintenance log request. Only whitelisted fields are mutable.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMaintenanceLog {
    pub status: Option<i16>,
    pub notes: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub assigned_to: Option<i32>,
    pub cost: Option<Decimal>,
}

/// Maintenance log listing filters with pagination
#[derive(Debug, Deserialize, IntoParams)]
pub struct MaintenanceLogQuery {
    pub room_id: Option<i32>,
    pub status: Option<i16>,
    pub assigned_to: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Pagination metadata returned by list endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + per_page - 1) / per_page
        };
        Self {
            current_page: page,
            total_pages,
            per_page,
            total_items,
            has_more: page < total_pages,
        }
    }
}

/// A selectable maintenance status, for the statuses endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceStatusEntry {
    pub id: i16,
    pub name: String,
}

impl From<MaintenanceStatus> for MaintenanceStatusEntry {
    fn from(s: MaintenanceStatus) -> Self {
        Self {
            id: s.into(),
            name: s.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(1, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_more);

        let meta = PaginationMeta::new(3, 10, 25);
        assert!(!meta.has_more);

        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_more);
    }
}
