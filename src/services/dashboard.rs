//! Role-specific dashboard aggregates
//!
//! Dashboards are read-only snapshots built from a handful of aggregate
//! queries against the pool; no transaction is needed.

use crate::{
    error::AppResult,
    models::{
        dashboard::{
            AdminDashboard, FrontDeskDashboard, HandymanDashboard, RoomStatusCount, UpcomingStay,
        },
        enums::{ReservationStatus, RoomStatus},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Property-wide snapshot for administrators
    pub async fn admin(&self) -> AppResult<AdminDashboard> {
        let rooms_by_status = self.rooms_by_status().await?;
        let total_rooms: i64 = rooms_by_status.iter().map(|r| r.count).sum();
        let occupied = rooms_by_status
            .iter()
            .find(|r| r.status == RoomStatus::Occupied as i16)
            .map(|r| r.count)
            .unwrap_or(0);
        let occupancy_rate = if total_rooms == 0 {
            0.0
        } else {
            occupied as f64 / total_rooms as f64 * 100.0
        };

        let monthly_revenue = self.repository.reservations.monthly_revenue().await?;
        let open_maintenance = self.repository.maintenance.count_open().await?;

        let checkins_today: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservations
            WHERE status = $1 AND checkin_datetime::date = CURRENT_DATE
            "#,
        )
        .bind(ReservationStatus::Confirmed as i16)
        .fetch_one(&self.repository.pool)
        .await?;

        let checkouts_today: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservations
            WHERE status = $1 AND checkout_datetime::date = CURRENT_DATE
            "#,
        )
        .bind(ReservationStatus::CheckedIn as i16)
        .fetch_one(&self.repository.pool)
        .await?;

        let pending_room_assignments: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE room_assignment_pending AND status = ANY($1)",
        )
        .bind(
            &[
                ReservationStatus::Pending as i16,
                ReservationStatus::Confirmed as i16,
            ][..],
        )
        .fetch_one(&self.repository.pool)
        .await?;

        Ok(AdminDashboard {
            total_rooms,
            rooms_by_status,
            occupancy_rate,
            monthly_revenue,
            checkins_today,
            checkouts_today,
            open_maintenance,
            pending_room_assignments,
        })
    }

    /// Today's arrivals, departures and unassigned bookings for front desk
    pub async fn front_desk(&self) -> AppResult<FrontDeskDashboard> {
        let arrivals_today = sqlx::query_as::<_, UpcomingStay>(&stay_query(
            "res.status = $1 AND res.checkin_datetime::date = CURRENT_DATE",
            "res.checkin_datetime",
        ))
        .bind(ReservationStatus::Confirmed as i16)
        .fetch_all(&self.repository.pool)
        .await?;

        let departures_today = sqlx::query_as::<_, UpcomingStay>(&stay_query(
            "res.status = $1 AND res.checkout_datetime::date = CURRENT_DATE",
            "res.checkout_datetime",
        ))
        .bind(ReservationStatus::CheckedIn as i16)
        .fetch_all(&self.repository.pool)
        .await?;

        let pending_assignments = sqlx::query_as::<_, UpcomingStay>(&stay_query(
            "res.room_assignment_pending AND res.status = ANY($1)",
            "res.checkin_datetime",
        ))
        .bind(
            &[
                ReservationStatus::Pending as i16,
                ReservationStatus::Confirmed as i16,
            ][..],
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let rooms_by_status = self.rooms_by_status().await?;

        Ok(FrontDeskDashboard {
            arrivals_today,
            departures_today,
            pending_assignments,
            rooms_by_status,
        })
    }

    /// Open task list for a maintenance employee
    pub async fn handyman(&self, employee_id: i32) -> AppResult<HandymanDashboard> {
        let my_tasks = self
            .repository
            .maintenance
            .list_open(Some(employee_id))
            .await?;
        let open_total = self.repository.maintenance.count_open().await?;

        Ok(HandymanDashboard {
            my_tasks,
            open_total,
        })
    }

    async fn rooms_by_status(&self) -> AppResult<Vec<RoomStatusCount>> {
        let counts: Vec<(i16, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM rooms GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(counts
            .into_iter()
            .map(|(status, count)| RoomStatusCount {
                status,
                status_name: RoomStatus::try_from(status)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| format!("unknown ({})", status)),
                count,
            })
            .collect())
    }
}

fn stay_query(condition: &str, order_by: &str) -> String {
    format!(
        r#"
        SELECT res.id as reservation_id, c.name as customer_name,
               r.room_number, rt.name as room_type_name,
               res.checkin_datetime, res.checkout_datetime,
               res.status, res.guest_count
        FROM reservations res
        JOIN customers c ON res.customer_id = c.id
        JOIN room_types rt ON res.room_type_id = rt.id
        LEFT JOIN room_assignments ra ON ra.reservation_id = res.id
        LEFT JOIN rooms r ON ra.room_id = r.id
        WHERE {}
        ORDER BY {}
        "#,
        condition, order_by
    )
}
