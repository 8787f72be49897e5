//! Circuits backend
//!
//! REST persistence for energy circuits plus a headless editor client that
//! tracks which circuits currently have energy.

pub mod api;
pub mod client;
pub mod clock;
pub mod config;
pub mod db;
pub mod editor;
pub mod energy;
pub mod errors;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/circuits",
            get(api::list_circuits).post(api::create_circuit),
        )
        .route(
            "/circuits/{id}",
            put(api::update_circuit).delete(api::delete_circuit),
        );

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
