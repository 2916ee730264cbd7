//! Rooms and room types repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RoomStatus,
        room::{Room, RoomQuery, RoomType, RoomWithType},
    },
};

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get room by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// List rooms with their type details, optionally filtered
    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<RoomWithType>> {
        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if query.status.is_some() {
            param_idx += 1;
            conditions.push(format!("r.status = ${}", param_idx));
        }
        if query.room_type_id.is_some() {
            param_idx += 1;
            conditions.push(format!("r.room_type_id = ${}", param_idx));
        }
        if query.floor.is_some() {
            param_idx += 1;
            conditions.push(format!("r.floor = ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT r.id, r.room_number, r.floor, r.status, r.room_type_id,
                   rt.name as room_type_name, rt.price_per_night, rt.capacity
            FROM rooms r
            JOIN room_types rt ON r.room_type_id = rt.id
            {}
            ORDER BY r.floor, r.room_number
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, RoomWithType>(&sql);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(room_type_id) = query.room_type_id {
            builder = builder.bind(room_type_id);
        }
        if let Some(floor) = query.floor {
            builder = builder.bind(floor);
        }

        let rooms = builder.fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    /// Set a room's status
    pub async fn update_status(&self, id: i32, status: RoomStatus) -> AppResult<Room> {
        let updated = sqlx::query("UPDATE rooms SET status = $1 WHERE id = $2")
            .bind(i16::from(status))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Get room type by ID
    pub async fn get_type_by_id(&self, id: i32) -> AppResult<RoomType> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room type with id {} not found", id)))
    }

    /// List all room types
    pub async fn list_types(&self) -> AppResult<Vec<RoomType>> {
        let types = sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(types)
    }
}
