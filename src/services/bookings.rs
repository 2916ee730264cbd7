//! Booking service: validation pipeline and reservation operations
//!
//! Every business rule is checked before the booking transaction opens;
//! the availability check alone is re-run inside the transaction, under
//! row locks, by the repository.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{BookingType, ReservationStatus},
        payment::AdvancePayment,
        reservation::{
            AdvancePaymentInput, AvailabilityQuery, BookingRequest, BookingResponse,
            BookingTarget, Reservation, ReservationDetails, ReservationQuery, ValidatedBooking,
        },
    },
    pricing::calculate_time_pricing_adjustments,
    repository::Repository,
};

/// Check-in defaults to 15:00 when no time of day is supplied
const DEFAULT_CHECKIN_TIME: (u32, u32, u32) = (15, 0, 0);
/// Check-out defaults to 12:00 when no time of day is supplied
const DEFAULT_CHECKOUT_TIME: (u32, u32, u32) = (12, 0, 0);
/// Minimum stay duration in hours
const MIN_STAY_HOURS: i64 = 4;

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and persist a booking; all writes are atomic
    pub async fn create_booking(&self, request: BookingRequest) -> AppResult<BookingResponse> {
        let booking = validate_booking(&request)?;
        let record = self.repository.reservations.create_booking(&booking).await?;

        let room_assignment_pending = match booking.target.booking_type() {
            BookingType::RoomType => Some(true),
            BookingType::SpecificRoom => None,
        };

        Ok(BookingResponse {
            success: true,
            reservation_id: record.reservation_id,
            customer_id: record.customer.id,
            customer: record.customer,
            advance_payment_id: record.advance_payment_id,
            checkin_datetime: booking.checkin_datetime,
            checkout_datetime: booking.checkout_datetime,
            pricing_adjustments: booking.adjustments,
            final_total: record.final_total,
            room_assignment_pending,
            available_rooms_of_type: record.available_rooms_of_type,
        })
    }

    /// Advisory room-type availability count
    pub async fn check_availability(&self, query: &AvailabilityQuery) -> AppResult<i64> {
        if query.checkout_datetime <= query.checkin_datetime {
            return Err(AppError::Validation(
                "Check-out must be after check-in".to_string(),
            ));
        }
        if query.guest_count < 1 {
            return Err(AppError::Validation(
                "Guest count must be at least 1".to_string(),
            ));
        }

        self.repository
            .reservations
            .count_available_rooms(
                query.room_type_id,
                query.checkin_datetime,
                query.checkout_datetime,
                query.guest_count,
            )
            .await
    }

    /// List reservations with pagination
    pub async fn list(
        &self,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<ReservationDetails>, i64)> {
        self.repository.reservations.list(query).await
    }

    /// Get one reservation with details
    pub async fn get(&self, id: i32) -> AppResult<ReservationDetails> {
        self.repository.reservations.get_details(id).await
    }

    /// Advance payments recorded against a reservation
    pub async fn payments(&self, id: i32) -> AppResult<Vec<AdvancePayment>> {
        self.repository.reservations.list_payments(id).await
    }

    /// Transition a reservation's status, syncing assigned room statuses
    pub async fn update_status(&self, id: i32, status: i16) -> AppResult<Reservation> {
        let status = ReservationStatus::try_from(status).map_err(AppError::Validation)?;
        self.repository.reservations.update_status(id, status).await
    }

    /// Assign a concrete room to a pending room-type reservation
    pub async fn assign_room(&self, reservation_id: i32, room_id: i32) -> AppResult<Reservation> {
        self.repository
            .reservations
            .assign_room(reservation_id, room_id)
            .await
    }
}

/// Run the full validation pipeline over a raw booking payload.
///
/// Checks run in order; the first violation aborts with a field-specific
/// message and nothing is written.
pub fn validate_booking(request: &BookingRequest) -> AppResult<ValidatedBooking> {
    let customer_name = require_text(&request.customer_name, "customer_name")?;
    let customer_email = require_text(&request.customer_email, "customer_email")?;
    if !customer_email.validate_email() {
        return Err(AppError::Validation(
            "Invalid customer_email address".to_string(),
        ));
    }

    let target = match (request.room_id, request.room_type_id) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Specify either room_id or room_type_id, not both".to_string(),
            ))
        }
        (Some(room_id), None) => BookingTarget::Room(room_id),
        (None, Some(room_type_id)) => BookingTarget::RoomType(room_type_id),
        (None, None) => {
            return Err(AppError::Validation(
                "Missing required field: room_id or room_type_id".to_string(),
            ))
        }
    };

    let checkin_date = request
        .checkin_date
        .ok_or_else(|| AppError::Validation("Missing required field: checkin_date".to_string()))?;
    let checkout_date = request
        .checkout_date
        .ok_or_else(|| AppError::Validation("Missing required field: checkout_date".to_string()))?;
    let guest_count = request
        .guest_count
        .ok_or_else(|| AppError::Validation("Missing required field: guest_count".to_string()))?;
    let total_amount = request
        .total_amount
        .ok_or_else(|| AppError::Validation("Missing required field: total_amount".to_string()))?;

    if guest_count < 1 {
        return Err(AppError::Validation(
            "Guest count must be at least 1".to_string(),
        ));
    }
    if total_amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "Total amount cannot be negative".to_string(),
        ));
    }

    let checkin_time = parse_time_of_day(
        request.checkin_time.as_deref(),
        DEFAULT_CHECKIN_TIME,
        "checkin_time",
    )?;
    let checkout_time = parse_time_of_day(
        request.checkout_time.as_deref(),
        DEFAULT_CHECKOUT_TIME,
        "checkout_time",
    )?;

    let checkin_datetime = NaiveDateTime::new(checkin_date, checkin_time);
    let checkout_datetime = NaiveDateTime::new(checkout_date, checkout_time);

    if checkout_datetime <= checkin_datetime {
        return Err(AppError::Validation(
            "Check-out must be after check-in".to_string(),
        ));
    }
    if checkout_datetime - checkin_datetime < Duration::hours(MIN_STAY_HOURS) {
        return Err(AppError::Validation(format!(
            "Minimum stay is {} hours",
            MIN_STAY_HOURS
        )));
    }

    for item in &request.menu_items {
        if item.quantity < 1 {
            return Err(AppError::Validation(
                "Menu item quantity must be at least 1".to_string(),
            ));
        }
    }

    let advance_amount = request.advance_payment.unwrap_or(Decimal::ZERO);
    if advance_amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "Advance payment cannot be negative".to_string(),
        ));
    }
    let advance = if advance_amount > Decimal::ZERO {
        let payment_method = request
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                AppError::Validation(
                    "A payment method is required for advance payments".to_string(),
                )
            })?;
        if advance_amount > total_amount {
            return Err(AppError::Validation(
                "Advance payment cannot exceed the total amount".to_string(),
            ));
        }
        Some(AdvancePaymentInput {
            amount: advance_amount,
            payment_method: payment_method.to_string(),
            reference_number: request.reference_number.clone(),
        })
    } else {
        None
    };

    let adjustments = calculate_time_pricing_adjustments(checkin_time, checkout_time);
    let adjusted_total = total_amount + adjustments.total_adjustment;

    Ok(ValidatedBooking {
        customer_name,
        customer_email,
        customer_phone: request.customer_phone.clone(),
        target,
        checkin_datetime,
        checkout_datetime,
        guest_count,
        total_amount: adjusted_total,
        advance,
        service_ids: request.service_ids.clone(),
        menu_items: request.menu_items.clone(),
        special_requests: request.special_requests.clone(),
        adjustments,
    })
}

fn require_text(field: &Option<String>, name: &str) -> AppResult<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", name)))
}

fn parse_time_of_day(
    value: Option<&str>,
    default: (u32, u32, u32),
    field: &str,
) -> AppResult<NaiveTime> {
    match value {
        None => {
            let (h, m, s) = default;
            NaiveTime::from_hms_opt(h, m, s)
                .ok_or_else(|| AppError::Internal(format!("Invalid default {}", field)))
        }
        Some(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map_err(|_| {
                AppError::Validation(format!("Invalid {}: expected HH:MM or HH:MM:SS", field))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::models::reservation::MenuItemSelection;

    fn base_request() -> BookingRequest {
        BookingRequest {
            customer_name: Some("Ada Castillo".to_string()),
            customer_email: Some("ada@example.com".to_string()),
            customer_phone: Some("555-0101".to_string()),
            room_id: None,
            room_type_id: Some(2),
            checkin_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            checkout_date: NaiveDate::from_ymd_opt(2026, 9, 3),
            checkin_time: None,
            checkout_time: None,
            guest_count: Some(2),
            total_amount: Some(dec!(1000)),
            advance_payment: None,
            payment_method: None,
            reference_number: None,
            service_ids: Vec::new(),
            menu_items: Vec::new(),
            special_requests: None,
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn default_times_are_applied() {
        let booking = validate_booking(&base_request()).unwrap();
        assert_eq!(
            booking.checkin_datetime.time(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap()
        );
        assert_eq!(
            booking.checkout_datetime.time(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        // 15:00 in, 12:00 out: no adjustment
        assert_eq!(booking.total_amount, dec!(1000));
    }

    #[test]
    fn missing_fields_name_the_field() {
        let mut request = base_request();
        request.customer_name = None;
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Missing required field: customer_name"
        );

        let mut request = base_request();
        request.checkin_date = None;
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Missing required field: checkin_date"
        );

        let mut request = base_request();
        request.room_type_id = None;
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Missing required field: room_id or room_type_id"
        );
    }

    #[test]
    fn both_room_and_room_type_rejected() {
        let mut request = base_request();
        request.room_id = Some(11);
        assert!(validate_booking(&request).is_err());
    }

    #[test]
    fn invalid_email_rejected() {
        let mut request = base_request();
        request.customer_email = Some("not-an-email".to_string());
        assert!(validate_booking(&request).is_err());
    }

    #[test]
    fn checkout_must_follow_checkin() {
        let mut request = base_request();
        request.checkout_date = request.checkin_date;
        request.checkin_time = Some("15:00:00".to_string());
        request.checkout_time = Some("12:00:00".to_string());
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Check-out must be after check-in"
        );
    }

    #[test]
    fn stay_shorter_than_four_hours_rejected() {
        let mut request = base_request();
        request.checkout_date = request.checkin_date;
        request.checkin_time = Some("10:00:00".to_string());
        request.checkout_time = Some("13:00:00".to_string());
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Minimum stay is 4 hours"
        );
    }

    #[test]
    fn stay_of_exactly_four_hours_accepted() {
        let mut request = base_request();
        request.checkout_date = request.checkin_date;
        request.checkin_time = Some("08:00:00".to_string());
        request.checkout_time = Some("12:00:00".to_string());
        assert!(validate_booking(&request).is_ok());
    }

    #[test]
    fn advance_payment_requires_method() {
        let mut request = base_request();
        request.advance_payment = Some(dec!(200));
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "A payment method is required for advance payments"
        );

        request.payment_method = Some("card".to_string());
        let booking = validate_booking(&request).unwrap();
        let advance = booking.advance.unwrap();
        assert_eq!(advance.amount, dec!(200));
        assert_eq!(advance.payment_method, "card");
    }

    #[test]
    fn advance_payment_cannot_exceed_total() {
        let mut request = base_request();
        request.advance_payment = Some(dec!(1500));
        request.payment_method = Some("card".to_string());
        assert_eq!(
            message(validate_booking(&request).unwrap_err()),
            "Advance payment cannot exceed the total amount"
        );
    }

    #[test]
    fn time_adjustments_are_added_to_total() {
        let mut request = base_request();
        request.checkin_time = Some("10:00:00".to_string());
        let booking = validate_booking(&request).unwrap();
        assert_eq!(booking.total_amount, dec!(1500));
        assert_eq!(booking.adjustments.total_adjustment, dec!(500));
    }

    #[test]
    fn menu_item_quantity_must_be_positive() {
        let mut request = base_request();
        request.menu_items = vec![MenuItemSelection {
            menu_item_id: 4,
            quantity: 0,
        }];
        assert!(validate_booking(&request).is_err());
    }

    #[test]
    fn time_parsing_accepts_short_form() {
        let mut request = base_request();
        request.checkin_time = Some("16:30".to_string());
        let booking = validate_booking(&request).unwrap();
        assert_eq!(
            booking.checkin_datetime.time(),
            NaiveTime::from_hms_opt(16, 30, 0).unwrap()
        );

        request.checkin_time = Some("late".to_string());
        assert!(validate_booking(&request).is_err());
    }
}
