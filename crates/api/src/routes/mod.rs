//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod chart;
pub mod entries;
pub mod health;
pub mod reconciliation;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(chart::routes())
        .merge(entries::routes())
        .merge(reports::routes())
        .merge(reconciliation::routes())
}
