//! matchmakin server - HTTP API for the tracker
//!
//! This crate provides the web front-end backend:
//! - REST API for roster operations (fight, rename, delete, undo, reset)
//! - Selection-mode API mirroring the button front-ends
//! - Static file serving for the bundled web page

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "web".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Roster API
        .route("/api/roster", get(routes::roster::get_roster))
        .route("/api/roster/new", post(routes::roster::new_game))
        .route("/api/roster/fight", post(routes::roster::fight))
        .route("/api/roster/rename", post(routes::roster::rename))
        .route("/api/roster/delete", post(routes::roster::delete))
        .route("/api/roster/undo", post(routes::roster::undo))
        .route("/api/roster/reset", post(routes::roster::reset))
        // Selection modes
        .route("/api/mode", post(routes::mode::toggle_mode))
        .route("/api/press", post(routes::mode::press))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with default names
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    run_server_with_state(config, Arc::new(ServerState::new())).await
}

/// Start the HTTP server over an existing session
pub async fn run_server_with_state(
    config: ServerConfig,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = create_router(&config, state);

    tracing::info!("matchmakin server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
