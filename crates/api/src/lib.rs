//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - The shared application state (database pool + chart of accounts)
//! - Mapping from structured domain errors to HTTP responses

pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use compta_core::chart::ChartOfAccounts;

/// Application state shared across handlers.
///
/// The chart of accounts is loaded once at startup and injected here as an
/// immutable value; handlers never consult global registries.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// The chart of accounts, immutable after load.
    pub chart: Arc<ChartOfAccounts>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
