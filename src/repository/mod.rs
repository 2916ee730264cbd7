//! Repository layer for database operations

pub mod employees;
pub mod maintenance;
pub mod otp;
pub mod reservations;
pub mod rooms;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub employees: employees::EmployeesRepository,
    pub rooms: rooms::RoomsRepository,
    pub reservations: reservations::ReservationsRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub otp: otp::OtpRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            employees: employees::EmployeesRepository::new(pool.clone()),
            rooms: rooms::RoomsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            otp: otp::OtpRepository::new(pool.clone()),
            pool,
        }
    }

    /// Verify the database connection is alive
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
