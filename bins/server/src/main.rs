//! ComptaEBNL API Server
//!
//! Main entry point for the ComptaEBNL backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compta_api::{AppState, create_router};
use compta_core::chart::ChartOfAccounts;
use compta_db::{ChartRepository, connect};
use compta_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compta=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Load the chart of accounts once; every ledger operation receives this
    // immutable value.
    let chart_repo = ChartRepository::new(db.clone());
    let chart = match chart_repo.count().await? {
        0 => {
            warn!("Chart of accounts table is empty, using the embedded SYCEBNL plan");
            ChartOfAccounts::sycebnl()
        }
        count => {
            let chart = chart_repo.load_chart().await?;
            info!(accounts = count, "Chart of accounts loaded");
            chart
        }
    };

    let issues = chart.validate_consistency();
    if !issues.is_empty() {
        warn!(issues = issues.len(), "Chart of accounts has consistency issues");
    }

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        chart: Arc::new(chart),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
