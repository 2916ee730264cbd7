//! Reservation models and booking request types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::customer::Customer;
use super::enums::{BookingType, ReservationStatus};
use crate::pricing::PricingAdjustments;

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: i32,
    pub customer_id: i32,
    pub room_type_id: i32,
    pub room_id: Option<i32>,
    pub booking_type: String,
    pub room_assignment_pending: bool,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub checkin_datetime: NaiveDateTime,
    pub checkout_datetime: NaiveDateTime,
    pub status: i16,
    pub guest_count: i32,
    pub total_amount: Decimal,
    pub advance_payment: Decimal,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn status(&self) -> Option<ReservationStatus> {
        ReservationStatus::try_from(self.status).ok()
    }
}

/// Reservation with customer details, for listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub booking_type: String,
    pub room_assignment_pending: bool,
    pub room_type_id: i32,
    pub room_type_name: String,
    pub room_id: Option<i32>,
    pub room_number: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub checkin_datetime: NaiveDateTime,
    pub checkout_datetime: NaiveDateTime,
    pub status: i16,
    pub guest_count: i32,
    pub total_amount: Decimal,
    pub advance_payment: Decimal,
    pub special_requests: Option<String>,
}

/// Requested hotel service or menu item charge
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MenuItemSelection {
    pub menu_item_id: i32,
    pub quantity: i32,
}

/// Raw booking payload as received from the client.
///
/// Date-only fields are combined with separate time-of-day fields;
/// check-in time defaults to 15:00 and check-out time to 12:00.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    /// Specific room to book; mutually exclusive with `room_type_id`
    pub room_id: Option<i32>,
    /// Room category to book with deferred room assignment
    pub room_type_id: Option<i32>,
    pub checkin_date: Option<NaiveDate>,
    pub checkout_date: Option<NaiveDate>,
    /// Time of day, "HH:MM:SS"; defaults to 15:00:00
    pub checkin_time: Option<String>,
    /// Time of day, "HH:MM:SS"; defaults to 12:00:00
    pub checkout_time: Option<String>,
    pub guest_count: Option<i32>,
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub advance_payment: Option<Decimal>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    #[serde(default)]
    pub service_ids: Vec<i32>,
    #[serde(default)]
    pub menu_items: Vec<MenuItemSelection>,
    pub special_requests: Option<String>,
}

/// The booking target after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    /// Bind to one physical room
    Room(i32),
    /// Bind to a room category, room assignment deferred
    RoomType(i32),
}

impl BookingTarget {
    pub fn booking_type(&self) -> BookingType {
        match self {
            BookingTarget::Room(_) => BookingType::SpecificRoom,
            BookingTarget::RoomType(_) => BookingType::RoomType,
        }
    }
}

/// Advance payment details present only when the amount is positive;
/// validation guarantees a payment method accompanies it.
#[derive(Debug, Clone)]
pub struct AdvancePaymentInput {
    pub amount: Decimal,
    pub payment_method: String,
    pub reference_number: Option<String>,
}

/// A booking payload that passed the full validation pipeline.
/// Timestamps are combined, the pricing adjustment is applied, and all
/// business rules hold; only availability remains to be enforced inside
/// the booking transaction.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub target: BookingTarget,
    pub checkin_datetime: NaiveDateTime,
    pub checkout_datetime: NaiveDateTime,
    pub guest_count: i32,
    /// Base total plus time-based adjustments
    pub total_amount: Decimal,
    pub advance: Option<AdvancePaymentInput>,
    pub service_ids: Vec<i32>,
    pub menu_items: Vec<MenuItemSelection>,
    pub special_requests: Option<String>,
    pub adjustments: PricingAdjustments,
}

/// Result of a committed booking transaction
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub reservation_id: i32,
    pub customer: Customer,
    pub advance_payment_id: Option<i32>,
    pub final_total: Decimal,
    /// Rooms of the requested type still available (room-type path)
    pub available_rooms_of_type: Option<i64>,
}

/// Booking endpoint response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub reservation_id: i32,
    pub customer_id: i32,
    /// The customer as stored after the upsert
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_payment_id: Option<i32>,
    pub checkin_datetime: NaiveDateTime,
    pub checkout_datetime: NaiveDateTime,
    pub pricing_adjustments: PricingAdjustments,
    pub final_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_assignment_pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_rooms_of_type: Option<i64>,
}

/// Availability check query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub room_type_id: i32,
    /// "YYYY-MM-DDTHH:MM:SS"
    pub checkin_datetime: NaiveDateTime,
    /// "YYYY-MM-DDTHH:MM:SS"
    pub checkout_datetime: NaiveDateTime,
    pub guest_count: i32,
}

/// Availability check response
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub available_count: i64,
}

/// Reservation listing filters with pagination
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReservationQuery {
    pub status: Option<i16>,
    /// Reservations overlapping this date
    pub date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Reservation status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationStatus {
    /// New reservation status code (1-5)
    pub status: i16,
}
