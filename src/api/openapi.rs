//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, dashboard, health, maintenance, reservations, rooms};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veranda API",
        version = "1.0.0",
        description = "Hotel Property Management System REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::verify_otp,
        auth::resend_otp,
        auth::forgot_password,
        auth::reset_password,
        auth::me,
        // Employees
        auth::list_employees,
        auth::get_employee,
        auth::create_employee,
        // Reservations
        reservations::create_booking,
        reservations::check_availability,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::list_reservation_payments,
        reservations::update_reservation_status,
        reservations::assign_room,
        // Rooms
        rooms::list_rooms,
        rooms::list_room_types,
        rooms::update_room_status,
        // Maintenance
        maintenance::list_maintenance_logs,
        maintenance::get_maintenance_log,
        maintenance::create_maintenance_log,
        maintenance::update_maintenance_log,
        maintenance::delete_maintenance_log,
        maintenance::list_maintenance_statuses,
        // Dashboards
        dashboard::admin_dashboard,
        dashboard::front_desk_dashboard,
        dashboard::handyman_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::VerifyOtpRequest,
            auth::VerifyOtpResponse,
            auth::ResendOtpRequest,
            auth::ForgotPasswordRequest,
            auth::ResetPasswordRequest,
            auth::MessageResponse,
            // Employees
            crate::models::employee::EmployeeInfo,
            crate::models::employee::CreateEmployee,
            crate::models::enums::EmployeeRole,
            crate::models::enums::OtpPurpose,
            // Reservations
            crate::models::reservation::BookingRequest,
            crate::models::reservation::MenuItemSelection,
            crate::models::reservation::BookingResponse,
            crate::models::reservation::AvailabilityResponse,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::UpdateReservationStatus,
            reservations::AssignRoomRequest,
            crate::models::customer::Customer,
            crate::models::payment::AdvancePayment,
            crate::pricing::PricingAdjustments,
            // Rooms
            crate::models::room::Room,
            crate::models::room::RoomWithType,
            crate::models::room::RoomType,
            crate::models::room::UpdateRoomStatus,
            // Maintenance
            crate::models::maintenance::MaintenanceLog,
            crate::models::maintenance::MaintenanceLogDetails,
            crate::models::maintenance::CreateMaintenanceLog,
            crate::models::maintenance::UpdateMaintenanceLog,
            crate::models::maintenance::MaintenanceStatusEntry,
            crate::models::maintenance::PaginationMeta,
            // Dashboards
            crate::models::dashboard::AdminDashboard,
            crate::models::dashboard::FrontDeskDashboard,
            crate::models::dashboard::HandymanDashboard,
            crate::models::dashboard::RoomStatusCount,
            crate::models::dashboard::UpcomingStay,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "employees", description = "Employee account management"),
        (name = "reservations", description = "Reservations and bookings"),
        (name = "rooms", description = "Room inventory"),
        (name = "maintenance", description = "Maintenance logs"),
        (name = "dashboard", description = "Role-specific dashboards")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
