//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{active_session, end_session, health_check, start_session, stats};
use crate::signal::shutdown_signal;
use crate::state::AppState;

/// Assemble the router. Exposed separately so tests can serve it in-process
/// on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/focus/start", post(start_session))
        .route("/focus/end", post(end_session))
        .route("/focus/active", get(active_session))
        .route("/focus/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Focus-session backend server
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("focus backend listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
