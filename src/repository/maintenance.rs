//! Maintenance logs repository
//!
//! Every mutation that touches a log also applies the maintenance-status
//! to room-status projection inside the same transaction, so the room
//! status never drifts from its open maintenance records.

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{MaintenanceStatus, RoomStatus},
        maintenance::{
            CreateMaintenanceLog, MaintenanceLog, MaintenanceLogDetails, MaintenanceLogQuery,
            UpdateMaintenanceLog,
        },
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get maintenance log by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceLog> {
        sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Maintenance log with id {} not found", id))
            })
    }

    /// List maintenance logs with room and assignee context, paginated
    pub async fn list(
        &self,
        query: &MaintenanceLogQuery,
    ) -> AppResult<(Vec<MaintenanceLogDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if query.room_id.is_some() {
            param_idx += 1;
            conditions.push(format!("m.room_id = ${}", param_idx));
        }
        if query.status.is_some() {
            param_idx += 1;
            conditions.push(format!("m.status = ${}", param_idx));
        }
        if query.assigned_to.is_some() {
            param_idx += 1;
            conditions.push(format!("m.assigned_to = ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM maintenance_logs m {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(room_id) = query.room_id {
            count_builder = count_builder.bind(room_id);
        }
        if let Some(status) = query.status {
            count_builder = count_builder.bind(status);
        }
        if let Some(assigned_to) = query.assigned_to {
            count_builder = count_builder.bind(assigned_to);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_sql = format!(
            r#"
            SELECT m.id, m.room_id, r.room_number, m.status, m.assigned_to,
                   e.firstname || ' ' || e.lastname as assigned_to_name,
                   m.scheduled_date, m.started_at, m.completed_at, m.notes, m.cost
            FROM maintenance_logs m
            JOIN rooms r ON m.room_id = r.id
            LEFT JOIN employees e ON m.assigned_to = e.id
            {}
            ORDER BY m.scheduled_date DESC, m.id DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, MaintenanceLogDetails>(&select_sql);
        if let Some(room_id) = query.room_id {
            select_builder = select_builder.bind(room_id);
        }
        if let Some(status) = query.status {
            select_builder = select_builder.bind(status);
        }
        if let Some(assigned_to) = query.assigned_to {
            select_builder = select_builder.bind(assigned_to);
        }
        let logs = select_builder.fetch_all(&self.pool).await?;

        Ok((logs, total))
    }

    /// Create a maintenance log scheduled for today and project the room status
    pub async fn create(
        &self,
        log: &CreateMaintenanceLog,
        status: MaintenanceStatus,
    ) -> AppResult<MaintenanceLog> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let room_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
                .bind(log.room_id)
                .fetch_one(&mut *tx)
                .await?;
        if !room_exists {
            return Err(AppError::NotFound(format!(
                "Room with id {} not found",
                log.room_id
            )));
        }

        let started_at = match status {
            MaintenanceStatus::InProgress => Some(now),
            _ => None,
        };

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_logs
                (room_id, status, assigned_to, scheduled_date, started_at, notes, created_at)
            VALUES ($1, $2, $3, CURRENT_DATE, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(log.room_id)
        .bind(status as i16)
        .bind(log.assigned_to)
        .bind(started_at)
        .bind(&log.notes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        apply_room_projection(&mut tx, log.room_id, status).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update the whitelisted fields of a log; a status change re-applies
    /// the room status projection.
    pub async fn update(&self, id: i32, update: &UpdateMaintenanceLog) -> AppResult<MaintenanceLog> {
        let current = self.get_by_id(id).await?;

        let new_status = match update.status {
            Some(v) => Some(
                MaintenanceStatus::try_from(v).map_err(AppError::Validation)?,
            ),
            None => None,
        };

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let mut sets = Vec::new();
        let mut param_idx = 0;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    param_idx += 1;
                    sets.push(format!("{} = ${}", $name, param_idx));
                }
            };
        }

        add_field!(update.status, "status");
        add_field!(update.notes, "notes");
        add_field!(update.scheduled_date, "scheduled_date");
        add_field!(update.assigned_to, "assigned_to");
        add_field!(update.cost, "cost");

        if sets.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        // Progress timestamps follow the status transition
        if let Some(status) = new_status {
            match status {
                MaintenanceStatus::InProgress => {
                    param_idx += 1;
                    sets.push(format!("started_at = ${}", param_idx));
                }
                MaintenanceStatus::Completed => {
                    param_idx += 1;
                    sets.push(format!("completed_at = ${}", param_idx));
                }
                MaintenanceStatus::Pending => {}
            }
        }

        let sql = format!(
            "UPDATE maintenance_logs SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(update.status);
        bind_field!(update.notes);
        bind_field!(update.scheduled_date);
        bind_field!(update.assigned_to);
        bind_field!(update.cost);

        if let Some(status) = new_status {
            if status != MaintenanceStatus::Pending {
                builder = builder.bind(now);
            }
        }

        builder.execute(&mut *tx).await?;

        if let Some(status) = new_status {
            if i16::from(status) != current.status {
                apply_room_projection(&mut tx, current.room_id, status).await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a log; the room resets to available only when no other
    /// pending or in-progress log still references it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let log = self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM maintenance_logs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let open_logs: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_logs WHERE room_id = $1 AND status = ANY($2)",
        )
        .bind(log.room_id)
        .bind(
            &[
                MaintenanceStatus::Pending as i16,
                MaintenanceStatus::InProgress as i16,
            ][..],
        )
        .fetch_one(&mut *tx)
        .await?;

        if open_logs == 0 {
            sqlx::query("UPDATE rooms SET status = $1 WHERE id = $2")
                .bind(RoomStatus::Available as i16)
                .bind(log.room_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Open (pending or in-progress) logs, optionally for one employee
    pub async fn list_open(
        &self,
        assigned_to: Option<i32>,
    ) -> AppResult<Vec<MaintenanceLogDetails>> {
        let query = MaintenanceLogQuery {
            room_id: None,
            status: None,
            assigned_to,
            page: Some(1),
            per_page: Some(100),
        };
        let (logs, _) = self.list(&query).await?;
        Ok(logs
            .into_iter()
            .filter(|l| {
                l.status == MaintenanceStatus::Pending as i16
                    || l.status == MaintenanceStatus::InProgress as i16
            })
            .collect())
    }

    /// Count open maintenance logs
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_logs WHERE status = ANY($1)",
        )
        .bind(
            &[
                MaintenanceStatus::Pending as i16,
                MaintenanceStatus::InProgress as i16,
            ][..],
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Force the room status mandated by a maintenance status
async fn apply_room_projection(
    tx: &mut Transaction<'_, Postgres>,
    room_id: i32,
    status: MaintenanceStatus,
) -> AppResult<()> {
    sqlx::query("UPDATE rooms SET status = $1 WHERE id = $2")
        .bind(status.room_status_projection() as i16)
        .bind(room_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
