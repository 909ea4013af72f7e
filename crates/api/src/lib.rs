//! # Clinic API
//!
//! HTTP surface of the clinic backend: doctor availability slots, notification
//! templates, patient registration and medication routines.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests, call into `clinic-core`, persist through `clinic-db`
//! - **Middleware**: Password hashing, caller identity and error mapping
//! - **Config**: Environment-driven configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Authentication helpers and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use clinic_core::slot::SlotBuilder;
use clinic_db::repositories::{
    availability_slot::{AvailabilitySlotRepository, PgAvailabilitySlotRepository},
    medication::{MedicationRoutineRepository, PgMedicationRoutineRepository},
    notification_template::{NotificationTemplateRepository, PgNotificationTemplateRepository},
    patient::{PatientRepository, PgPatientRepository},
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Repositories are held as trait objects so tests can substitute the
/// `mockall` mocks generated in `clinic-db`.
pub struct ApiState {
    pub slots: Arc<dyn AvailabilitySlotRepository>,
    pub templates: Arc<dyn NotificationTemplateRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub medications: Arc<dyn MedicationRoutineRepository>,
    /// Builder configured with the deployment's midnight policy
    pub slot_builder: SlotBuilder,
}

impl ApiState {
    /// Wires every repository to the same PostgreSQL pool.
    pub fn from_pool(db_pool: PgPool, slot_builder: SlotBuilder) -> Self {
        Self {
            slots: Arc::new(PgAvailabilitySlotRepository::new(db_pool.clone())),
            templates: Arc::new(PgNotificationTemplateRepository::new(db_pool.clone())),
            patients: Arc::new(PgPatientRepository::new(db_pool.clone())),
            medications: Arc::new(PgMedicationRoutineRepository::new(db_pool)),
            slot_builder,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Doctor availability endpoints
        .merge(routes::availability::routes())
        // Notification template endpoints
        .merge(routes::notification::routes())
        // Patient and medication routine endpoints
        .merge(routes::patient::routes())
        .merge(routes::medication::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, builds shared state and routes, applies
/// CORS and timeout layers, and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let slot_builder = SlotBuilder::new(config.midnight_policy);
    info!("Availability slots use midnight policy '{}'", config.midnight_policy);

    let state = Arc::new(ApiState::from_pool(db_pool, slot_builder));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout and tracing middleware
    let app = app
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::timeout::TimeoutLayer::new(
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
