//! Reservations repository: availability checks and the booking transaction
//!
//! The booking transaction locks the candidate room rows and re-runs the
//! availability check inside the transaction, so concurrent bookings
//! serialize and each one counts against committed state. Only confirmed
//! and checked-in reservations block an interval; pending bookings do not
//! consume availability until confirmed.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        customer::Customer,
        enums::{BookingType, ReservationStatus, RoomStatus},
        payment::AdvancePayment,
        reservation::{
            BookingRecord, BookingTarget, Reservation, ReservationDetails, ReservationQuery,
            ValidatedBooking,
        },
    },
};

/// Reservation statuses that block a room for an overlapping interval
const BLOCKING_STATUSES: [i16; 2] = [
    ReservationStatus::Confirmed as i16,
    ReservationStatus::CheckedIn as i16,
];

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Advisory availability check for a room type over a half-open
    /// `[checkin, checkout)` interval. The authoritative check runs again
    /// inside the booking transaction.
    pub async fn count_available_rooms(
        &self,
        room_type_id: i32,
        checkin: NaiveDateTime,
        checkout: NaiveDateTime,
        guest_count: i32,
    ) -> AppResult<i64> {
        // Ensure the type exists so an unknown id is a 404, not zero availability
        let type_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM room_types WHERE id = $1)")
                .bind(room_type_id)
                .fetch_one(&self.pool)
                .await?;
        if !type_exists {
            return Err(AppError::NotFound(format!(
                "Room type with id {} not found",
                room_type_id
            )));
        }

        let free_rooms =
            count_free_rooms(&self.pool, room_type_id, checkin, checkout, guest_count).await?;
        let pending_type_bookings =
            count_pending_type_bookings(&self.pool, room_type_id, checkin, checkout).await?;

        Ok((free_rooms - pending_type_bookings).max(0))
    }

    /// Whether a specific room has any blocking reservation overlapping
    /// the interval.
    pub async fn room_has_overlap(
        &self,
        room_id: i32,
        checkin: NaiveDateTime,
        checkout: NaiveDateTime,
    ) -> AppResult<bool> {
        let overlaps = count_room_overlaps(&self.pool, room_id, checkin, checkout).await?;
        Ok(overlaps > 0)
    }

    /// Execute the booking transaction. Every write happens inside one
    /// database transaction; any failure rolls the whole booking back.
    pub async fn create_booking(&self, booking: &ValidatedBooking) -> AppResult<BookingRecord> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Availability is enforced under row locks inside the transaction
        let (room_type_id, room_id, available_after) = match booking.target {
            BookingTarget::Room(room_id) => {
                let room = sqlx::query("SELECT room_type_id FROM rooms WHERE id = $1 FOR UPDATE")
                    .bind(room_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Room with id {} not found", room_id))
                    })?;

                let overlaps = count_room_overlaps(
                    &mut *tx,
                    room_id,
                    booking.checkin_datetime,
                    booking.checkout_datetime,
                )
                .await?;
                if overlaps > 0 {
                    return Err(AppError::BusinessRule(
                        "Room is not available for the selected dates".to_string(),
                    ));
                }

                (room.get::<i32, _>("room_type_id"), Some(room_id), None)
            }
            BookingTarget::RoomType(room_type_id) => {
                let type_exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM room_types WHERE id = $1)")
                        .bind(room_type_id)
                        .fetch_one(&mut *tx)
                        .await?;
                if !type_exists {
                    return Err(AppError::NotFound(format!(
                        "Room type with id {} not found",
                        room_type_id
                    )));
                }

                // Lock the type's rooms so concurrent type-bookings serialize
                sqlx::query("SELECT id FROM rooms WHERE room_type_id = $1 FOR UPDATE")
                    .bind(room_type_id)
                    .fetch_all(&mut *tx)
                    .await?;

                let free_rooms = count_free_rooms(
                    &mut *tx,
                    room_type_id,
                    booking.checkin_datetime,
                    booking.checkout_datetime,
                    booking.guest_count,
                )
                .await?;
                let pending = count_pending_type_bookings(
                    &mut *tx,
                    room_type_id,
                    booking.checkin_datetime,
                    booking.checkout_datetime,
                )
                .await?;
                let available = (free_rooms - pending).max(0);

                if available <= 0 {
                    return Err(AppError::BusinessRule(
                        "No rooms of the requested type are available for the selected dates"
                            .to_string(),
                    ));
                }

                (room_type_id, None, Some(available - 1))
            }
        };

        // Upsert customer by email: name and phone are refreshed
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name,
                phone = COALESCE(EXCLUDED.phone, customers.phone)
            RETURNING id, name, email, phone
            "#,
        )
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .fetch_one(&mut *tx)
        .await?;
        let customer_id = customer.id;

        let booking_type = booking.target.booking_type();
        let room_assignment_pending = booking_type == BookingType::RoomType;

        let reservation_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (
                customer_id, room_type_id, room_id, booking_type, room_assignment_pending,
                checkin_date, checkout_date, checkin_datetime, checkout_datetime,
                status, guest_count, total_amount, advance_payment, special_requests, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0, $13, $14)
            RETURNING id
            "#,
        )
        .bind(customer_id)
        .bind(room_type_id)
        .bind(room_id)
        .bind(booking_type.as_str())
        .bind(room_assignment_pending)
        .bind(booking.checkin_datetime.date())
        .bind(booking.checkout_datetime.date())
        .bind(booking.checkin_datetime)
        .bind(booking.checkout_datetime)
        .bind(ReservationStatus::Pending as i16)
        .bind(booking.guest_count)
        .bind(booking.total_amount)
        .bind(&booking.special_requests)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(room_id) = room_id {
            sqlx::query("INSERT INTO room_assignments (reservation_id, room_id) VALUES ($1, $2)")
                .bind(reservation_id)
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }

        insert_audit_entry(
            &mut tx,
            reservation_id,
            "created",
            &format!(
                "Booking type: {}; time adjustments: {}",
                booking_type, booking.adjustments.total_adjustment
            ),
        )
        .await?;

        // Ancillary service and menu item charges
        let mut extra_charges = Decimal::ZERO;

        for service_id in &booking.service_ids {
            let price: Decimal =
                sqlx::query_scalar("SELECT price FROM hotel_services WHERE id = $1")
                    .bind(service_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::Validation(format!("Unknown service id {}", service_id))
                    })?;

            sqlx::query(
                r#"
                INSERT INTO reservation_requests (reservation_id, service_id, quantity, charge)
                VALUES ($1, $2, 1, $3)
                "#,
            )
            .bind(reservation_id)
            .bind(service_id)
            .bind(price)
            .execute(&mut *tx)
            .await?;

            extra_charges += price;
        }

        for item in &booking.menu_items {
            let price: Decimal = sqlx::query_scalar("SELECT price FROM menu_items WHERE id = $1")
                .bind(item.menu_item_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::Validation(format!("Unknown menu item id {}", item.menu_item_id))
                })?;

            let charge = price * Decimal::from(item.quantity);

            sqlx::query(
                r#"
                INSERT INTO reservation_requests (reservation_id, menu_item_id, quantity, charge)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(reservation_id)
            .bind(item.menu_item_id)
            .bind(item.quantity)
            .bind(charge)
            .execute(&mut *tx)
            .await?;

            extra_charges += charge;
        }

        let final_total = booking.total_amount + extra_charges;

        if extra_charges != Decimal::ZERO {
            sqlx::query("UPDATE reservations SET total_amount = $1 WHERE id = $2")
                .bind(final_total)
                .bind(reservation_id)
                .execute(&mut *tx)
                .await?;

            insert_audit_entry(
                &mut tx,
                reservation_id,
                "modified",
                &format!("Service charges added: {}", extra_charges),
            )
            .await?;
        }

        // Advance payment, pending verification
        let advance_payment_id = if let Some(ref advance) = booking.advance {
            let payment_id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO advance_payments (reservation_id, amount, payment_method, reference_number, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(reservation_id)
            .bind(advance.amount)
            .bind(&advance.payment_method)
            .bind(&advance.reference_number)
            .bind(crate::models::enums::PaymentStatus::Pending as i16)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("UPDATE reservations SET advance_payment = $1 WHERE id = $2")
                .bind(advance.amount)
                .bind(reservation_id)
                .execute(&mut *tx)
                .await?;

            insert_audit_entry(
                &mut tx,
                reservation_id,
                "payment_received",
                &format!(
                    "Advance payment {} via {}",
                    advance.amount, advance.payment_method
                ),
            )
            .await?;

            Some(payment_id)
        } else {
            None
        };

        if let Some(room_id) = room_id {
            sqlx::query("UPDATE rooms SET status = $1 WHERE id = $2")
                .bind(RoomStatus::Reserved as i16)
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(BookingRecord {
            reservation_id,
            customer,
            advance_payment_id,
            final_total,
            available_rooms_of_type: available_after,
        })
    }

    /// Advance payments recorded against a reservation
    pub async fn list_payments(&self, reservation_id: i32) -> AppResult<Vec<AdvancePayment>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reservations WHERE id = $1)")
                .bind(reservation_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Reservation with id {} not found",
                reservation_id
            )));
        }

        let payments = sqlx::query_as::<_, AdvancePayment>(
            "SELECT * FROM advance_payments WHERE reservation_id = $1 ORDER BY created_at",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// List reservations with customer and room context, paginated
    pub async fn list(
        &self,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<ReservationDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if query.status.is_some() {
            param_idx += 1;
            conditions.push(format!("res.status = ${}", param_idx));
        }
        if query.date.is_some() {
            param_idx += 1;
            conditions.push(format!(
                "res.checkin_date <= ${idx} AND res.checkout_date >= ${idx}",
                idx = param_idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM reservations res {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(status) = query.status {
            count_builder = count_builder.bind(status);
        }
        if let Some(date) = query.date {
            count_builder = count_builder.bind(date);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_sql = format!(
            r#"
            SELECT res.id, res.booking_type, res.room_assignment_pending,
                   res.room_type_id, rt.name as room_type_name,
                   res.room_id, r.room_number,
                   c.name as customer_name, c.email as customer_email,
                   res.checkin_datetime, res.checkout_datetime,
                   res.status, res.guest_count, res.total_amount,
                   res.advance_payment, res.special_requests
            FROM reservations res
            JOIN customers c ON res.customer_id = c.id
            JOIN room_types rt ON res.room_type_id = rt.id
            LEFT JOIN rooms r ON res.room_id = r.id
            {}
            ORDER BY res.checkin_datetime DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, ReservationDetails>(&select_sql);
        if let Some(status) = query.status {
            select_builder = select_builder.bind(status);
        }
        if let Some(date) = query.date {
            select_builder = select_builder.bind(date);
        }
        let reservations = select_builder.fetch_all(&self.pool).await?;

        Ok((reservations, total))
    }

    /// Get reservation details by ID
    pub async fn get_details(&self, id: i32) -> AppResult<ReservationDetails> {
        sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT res.id, res.booking_type, res.room_assignment_pending,
                   res.room_type_id, rt.name as room_type_name,
                   res.room_id, r.room_number,
                   c.name as customer_name, c.email as customer_email,
                   res.checkin_datetime, res.checkout_datetime,
                   res.status, res.guest_count, res.total_amount,
                   res.advance_payment, res.special_requests
            FROM reservations res
            JOIN customers c ON res.customer_id = c.id
            JOIN room_types rt ON res.room_type_id = rt.id
            LEFT JOIN rooms r ON res.room_id = r.id
            WHERE res.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Transition a reservation's status and sync every assigned room's
    /// status in the same transaction.
    pub async fn update_status(
        &self,
        id: i32,
        new_status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE reservations SET status = $1 WHERE id = $2")
            .bind(new_status as i16)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Reservation with id {} not found",
                id
            )));
        }

        let room_status = match new_status {
            ReservationStatus::Confirmed => Some(RoomStatus::Reserved),
            ReservationStatus::CheckedIn => Some(RoomStatus::Occupied),
            ReservationStatus::CheckedOut | ReservationStatus::Cancelled => {
                Some(RoomStatus::Available)
            }
            ReservationStatus::Pending => None,
        };

        if let Some(room_status) = room_status {
            sqlx::query(
                r#"
                UPDATE rooms SET status = $1
                WHERE id IN (SELECT room_id FROM room_assignments WHERE reservation_id = $2)
                "#,
            )
            .bind(room_status as i16)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Assign a concrete room to a pending room-type reservation
    pub async fn assign_room(&self, reservation_id: i32, room_id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
                .bind(reservation_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Reservation with id {} not found",
                        reservation_id
                    ))
                })?;

        if !reservation.room_assignment_pending {
            return Err(AppError::BusinessRule(
                "Reservation already has a room assigned".to_string(),
            ));
        }

        let room = sqlx::query("SELECT room_type_id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", room_id)))?;

        if room.get::<i32, _>("room_type_id") != reservation.room_type_id {
            return Err(AppError::BusinessRule(
                "Room does not belong to the reserved room type".to_string(),
            ));
        }

        let overlaps = count_room_overlaps(
            &mut *tx,
            room_id,
            reservation.checkin_datetime,
            reservation.checkout_datetime,
        )
        .await?;
        if overlaps > 0 {
            return Err(AppError::BusinessRule(
                "Room is not available for the reservation dates".to_string(),
            ));
        }

        sqlx::query("INSERT INTO room_assignments (reservation_id, room_id) VALUES ($1, $2)")
            .bind(reservation_id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE reservations SET room_id = $1, room_assignment_pending = false WHERE id = $2",
        )
        .bind(room_id)
        .bind(reservation_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE rooms SET status = $1 WHERE id = $2")
            .bind(RoomStatus::Reserved as i16)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_by_id(reservation_id).await
    }

    /// Revenue recognized this month (checked-out reservations)
    pub async fn monthly_revenue(&self) -> AppResult<Decimal> {
        let revenue: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_amount) FROM reservations
            WHERE status = $1
              AND date_trunc('month', checkout_datetime) = date_trunc('month', NOW())
            "#,
        )
        .bind(ReservationStatus::CheckedOut as i16)
        .fetch_one(&self.pool)
        .await?;

        Ok(revenue.unwrap_or(Decimal::ZERO))
    }
}

/// Rooms of the type, with sufficient capacity and available status, that
/// have no assignment to a blocking reservation overlapping the interval.
/// Overlap is the canonical half-open test:
/// `existing.checkin < new.checkout AND existing.checkout > new.checkin`.
async fn count_free_rooms(
    executor: impl sqlx::PgExecutor<'_>,
    room_type_id: i32,
    checkin: NaiveDateTime,
    checkout: NaiveDateTime,
    guest_count: i32,
) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM rooms r
        JOIN room_types rt ON r.room_type_id = rt.id
        WHERE r.room_type_id = $1
          AND r.status = $2
          AND rt.capacity >= $3
          AND NOT EXISTS (
              SELECT 1
              FROM room_assignments ra
              JOIN reservations res ON res.id = ra.reservation_id
              WHERE ra.room_id = r.id
                AND res.status = ANY($4)
                AND res.checkin_datetime < $6
                AND res.checkout_datetime > $5
          )
        "#,
    )
    .bind(room_type_id)
    .bind(RoomStatus::Available as i16)
    .bind(guest_count)
    .bind(&BLOCKING_STATUSES[..])
    .bind(checkin)
    .bind(checkout)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

/// Room-type bookings still awaiting assignment consume one slot each
async fn count_pending_type_bookings(
    executor: impl sqlx::PgExecutor<'_>,
    room_type_id: i32,
    checkin: NaiveDateTime,
    checkout: NaiveDateTime,
) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM reservations res
        WHERE res.room_type_id = $1
          AND res.booking_type = 'room_type'
          AND res.room_assignment_pending
          AND res.status = ANY($2)
          AND res.checkin_datetime < $4
          AND res.checkout_datetime > $3
        "#,
    )
    .bind(room_type_id)
    .bind(&BLOCKING_STATUSES[..])
    .bind(checkin)
    .bind(checkout)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

/// Blocking reservations assigned to one room that overlap the interval
async fn count_room_overlaps(
    executor: impl sqlx::PgExecutor<'_>,
    room_id: i32,
    checkin: NaiveDateTime,
    checkout: NaiveDateTime,
) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM room_assignments ra
        JOIN reservations res ON res.id = ra.reservation_id
        WHERE ra.room_id = $1
          AND res.status = ANY($2)
          AND res.checkin_datetime < $4
          AND res.checkout_datetime > $3
        "#,
    )
    .bind(room_id)
    .bind(&BLOCKING_STATUSES[..])
    .bind(checkin)
    .bind(checkout)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

async fn insert_audit_entry(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: i32,
    action: &str,
    details: &str,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO reservation_audit_log (reservation_id, action, details, created_at)
        VALUES ($1, $2, $3, NOW())
        "#,
    )
    .bind(reservation_id)
    .bind(action)
    .bind(details)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
