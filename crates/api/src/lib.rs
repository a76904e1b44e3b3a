//! # Hourbook API
//!
//! The API crate provides the web server for the Hourbook appointment
//! service. It exposes RESTful endpoints for booking and cancelling
//! appointments, listing providers, and reading provider notifications.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into engine and store calls
//! - **Middleware**: Bearer-token identity extraction and error mapping
//! - **Config**: Environment and application configuration
//!
//! The domain rules live in `hourbook-core`; handlers never re-implement
//! them. The API uses Axum as the web framework and SQLx for database
//! interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers bridging HTTP and the engines
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use hourbook_core::engine::{CancellationEngine, SchedulingEngine};
use hourbook_core::identity::IdentityProvider;
use hourbook_core::store::{AppointmentStore, UserDirectory};
use hourbook_core::time::Clock;

/// Shared application state accessible to all request handlers.
///
/// Every collaborator is held behind its contract so handlers (and tests)
/// never care which implementation is wired in.
pub struct ApiState {
    /// PostgreSQL connection pool for infrastructure queries
    pub db_pool: PgPool,
    /// Source of "now" for derived response flags
    pub clock: Arc<dyn Clock>,
    /// Resolves bearer tokens to actor ids
    pub identity: Arc<dyn IdentityProvider>,
    /// Appointment persistence
    pub appointments: Arc<dyn AppointmentStore>,
    /// User and provider lookups
    pub users: Arc<dyn UserDirectory>,
    /// Booking rules
    pub scheduling: SchedulingEngine,
    /// Cancellation rules
    pub cancellation: CancellationEngine,
}

/// Starts the API server with the provided configuration and state.
///
/// Initializes logging, assembles the router, applies CORS and timeout
/// layers, and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment booking and cancellation endpoints
        .merge(routes::appointments::routes())
        // Provider listing endpoints
        .merge(routes::providers::routes())
        // Provider notification endpoints
        .merge(routes::notifications::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
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
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
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
