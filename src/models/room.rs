//! Room and room type models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::RoomStatus;

/// Room type (category) model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoomType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_per_night: Decimal,
    pub capacity: i32,
}

/// Room model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i32,
    pub room_number: String,
    pub floor: i32,
    pub room_type_id: i32,
    pub status: i16,
}

/// Room with its type details, for listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RoomWithType {
    pub id: i32,
    pub room_number: String,
    pub floor: i32,
    pub status: i16,
    pub room_type_id: i32,
    pub room_type_name: String,
    pub price_per_night: Decimal,
    pub capacity: i32,
}

/// Room listing filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct RoomQuery {
    /// Filter by room status code
    pub status: Option<i16>,
    /// Filter by room type
    pub room_type_id: Option<i32>,
    /// Filter by floor
    pub floor: Option<i32>,
}

/// Manual room status override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoomStatus {
    /// New room status code (1-5)
    pub status: i16,
}

impl Room {
    pub fn status(&self) -> Option<RoomStatus> {
        RoomStatus::try_from(self.status).ok()
    }
}
