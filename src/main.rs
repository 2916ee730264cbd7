//! Veranda Server - Hotel Property Management System
//!
//! A Rust REST API server for hotel operations: rooms, reservations,
//! maintenance, and OTP-verified employee login.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veranda_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("veranda_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Veranda Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), config.email.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/verify-otp", post(api::auth::verify_otp))
        .route("/auth/resend-otp", post(api::auth::resend_otp))
        .route("/auth/forgot-password", post(api::auth::forgot_password))
        .route("/auth/reset-password", post(api::auth::reset_password))
        .route("/auth/me", get(api::auth::me))
        // Employees
        .route("/employees", get(api::auth::list_employees))
        .route("/employees", post(api::auth::create_employee))
        .route("/employees/:id", get(api::auth::get_employee))
        // Reservations
        .route("/reservations", post(api::reservations::create_booking))
        .route("/reservations", get(api::reservations::list_reservations))
        .route(
            "/reservations/availability",
            get(api::reservations::check_availability),
        )
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route(
            "/reservations/:id/payments",
            get(api::reservations::list_reservation_payments),
        )
        .route(
            "/reservations/:id/status",
            put(api::reservations::update_reservation_status),
        )
        .route(
            "/reservations/:id/assign-room",
            put(api::reservations::assign_room),
        )
        // Rooms
        .route("/rooms", get(api::rooms::list_rooms))
        .route("/rooms/:id/status", put(api::rooms::update_room_status))
        .route("/room-types", get(api::rooms::list_room_types))
        // Maintenance
        .route("/maintenance", get(api::maintenance::list_maintenance_logs))
        .route(
            "/maintenance",
            post(api::maintenance::create_maintenance_log),
        )
        .route(
            "/maintenance/statuses",
            get(api::maintenance::list_maintenance_statuses),
        )
        .route(
            "/maintenance/:id",
            get(api::maintenance::get_maintenance_log),
        )
        .route(
            "/maintenance/:id",
            put(api::maintenance::update_maintenance_log),
        )
        .route(
            "/maintenance/:id",
            delete(api::maintenance::delete_maintenance_log),
        )
        // Dashboards
        .route("/dashboard/admin", get(api::dashboard::admin_dashboard))
        .route(
            "/dashboard/front-desk",
            get(api::dashboard::front_desk_dashboard),
        )
        .route(
            "/dashboard/handyman",
            get(api::dashboard::handyman_dashboard),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
