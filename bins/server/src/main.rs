//! Ponmo Books API Server
//!
//! Main entry point for the Ponmo Books backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ponmo_api::middleware::auth::{AllowAllVerifier, StaticTokenVerifier, TokenVerifier};
use ponmo_api::{AppState, create_router};
use ponmo_core::accounts::ChartOfAccounts;
use ponmo_core::ledger::{InMemoryStore, Ledger};
use ponmo_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ponmo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the chart and the ledger
    let chart = Arc::new(ChartOfAccounts::standard());
    info!(accounts = chart.len(), "Chart of accounts loaded");

    let store = Arc::new(InMemoryStore::new());
    let ledger = Arc::new(Ledger::new(chart, store));

    // Wire the identity collaborator
    let verifier: Arc<dyn TokenVerifier> = match &config.auth.api_token {
        Some(token) => Arc::new(StaticTokenVerifier::new(token.clone())),
        None => {
            warn!("No API token configured; running without authentication");
            Arc::new(AllowAllVerifier)
        }
    };

    // Create application state
    let state = AppState { ledger, verifier };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
