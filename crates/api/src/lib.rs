//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes over the ledger core
//! - Bearer-token authentication middleware delegating to an injected
//!   identity verifier
//! - Response types

pub mod middleware;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ponmo_core::ledger::Ledger;

use crate::middleware::auth::TokenVerifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ledger, chart included.
    pub ledger: Arc<Ledger>,
    /// Identity collaborator used by the auth middleware.
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
