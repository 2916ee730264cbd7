//! Maintenance log service

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::MaintenanceStatus,
        maintenance::{
            CreateMaintenanceLog, MaintenanceLog, MaintenanceLogDetails, MaintenanceLogQuery,
            MaintenanceStatusEntry, PaginationMeta, UpdateMaintenanceLog,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List maintenance logs, paginated
    pub async fn list(
        &self,
        query: &MaintenanceLogQuery,
    ) -> AppResult<(Vec<MaintenanceLogDetails>, PaginationMeta)> {
        if let Some(status) = query.status {
            MaintenanceStatus::try_from(status).map_err(AppError::Validation)?;
        }

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let (logs, total) = self.repository.maintenance.list(query).await?;

        Ok((logs, PaginationMeta::new(page, per_page, total)))
    }

    /// Get one maintenance log
    pub async fn get(&self, id: i32) -> AppResult<MaintenanceLog> {
        self.repository.maintenance.get_by_id(id).await
    }

    /// Open a maintenance log and move the room into the matching status
    pub async fn create(&self, log: CreateMaintenanceLog) -> AppResult<MaintenanceLog> {
        let status = MaintenanceStatus::try_from(log.status).map_err(AppError::Validation)?;
        self.repository.maintenance.create(&log, status).await
    }

    /// Patch a maintenance log
    pub async fn update(&self, id: i32, update: UpdateMaintenanceLog) -> AppResult<MaintenanceLog> {
        self.repository.maintenance.update(id, &update).await
    }

    /// Delete a maintenance log
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.maintenance.delete(id).await
    }

    /// The selectable maintenance statuses
    pub fn statuses(&self) -> Vec<MaintenanceStatusEntry> {
        MaintenanceStatus::all()
            .into_iter()
            .map(MaintenanceStatusEntry::from)
            .collect()
    }
}
