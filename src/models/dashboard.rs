//! Dashboard view models, one per employee role

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::maintenance::MaintenanceLogDetails;

/// Room count for one status code
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RoomStatusCount {
    pub status: i16,
    pub status_name: String,
    pub count: i64,
}

/// A reservation slimmed down for dashboard lists
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UpcomingStay {
    pub reservation_id: i32,
    pub customer_name: String,
    pub room_number: Option<String>,
    pub room_type_name: String,
    pub checkin_datetime: NaiveDateTime,
    pub checkout_datetime: NaiveDateTime,
    pub status: i16,
    pub guest_count: i32,
}

/// Property-wide view for administrators
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub total_rooms: i64,
    pub rooms_by_status: Vec<RoomStatusCount>,
    pub occupancy_rate: f64,
    pub monthly_revenue: Decimal,
    pub checkins_today: i64,
    pub checkouts_today: i64,
    pub open_maintenance: i64,
    pub pending_room_assignments: i64,
}

/// Day-to-day view for front desk staff
#[derive(Debug, Serialize, ToSchema)]
pub struct FrontDeskDashboard {
    pub arrivals_today: Vec<UpcomingStay>,
    pub departures_today: Vec<UpcomingStay>,
    pub pending_assignments: Vec<UpcomingStay>,
    pub rooms_by_status: Vec<RoomStatusCount>,
}

/// Task view for maintenance staff
#[derive(Debug, Serialize, ToSchema)]
pub struct HandymanDashboard {
    pub my_tasks: Vec<MaintenanceLogDetails>,
    pub open_total: i64,
}
