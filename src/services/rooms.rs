//! Room inventory service

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RoomStatus,
        room::{Room, RoomQuery, RoomType, RoomWithType},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
}

impl RoomsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List rooms with type details
    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<RoomWithType>> {
        if let Some(status) = query.status {
            RoomStatus::try_from(status).map_err(AppError::Validation)?;
        }
        self.repository.rooms.list(query).await
    }

    /// List room types
    pub async fn list_types(&self) -> AppResult<Vec<RoomType>> {
        self.repository.rooms.list_types().await
    }

    /// Manual status override, outside of any booking or maintenance flow
    pub async fn update_status(&self, id: i32, status: i16) -> AppResult<Room> {
        let status = RoomStatus::try_from(status).map_err(AppError::Validation)?;
        self.repository.rooms.update_status(id, status).await
    }
}
