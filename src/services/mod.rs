//! Business logic services

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod email;
pub mod maintenance;
pub mod otp;
pub mod rooms;

use crate::{
    config::{AuthConfig, EmailConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub otp: otp::OtpService,
    pub bookings: bookings::BookingsService,
    pub rooms: rooms::RoomsService,
    pub maintenance: maintenance::MaintenanceService,
    pub dashboard: dashboard::DashboardService,
    pub email: email::EmailService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, email_config: EmailConfig) -> Self {
        let email = email::EmailService::new(email_config);
        let otp = otp::OtpService::new(repository.clone(), email.clone());

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, otp.clone(), email.clone()),
            otp,
            bookings: bookings::BookingsService::new(repository.clone()),
            rooms: rooms::RoomsService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            email,
            repository,
        }
    }

    /// Round-trip query to the database, for readiness checks
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
