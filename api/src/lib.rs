//! HTTP and WebSocket surface of the storefront assistant.
//!
//! - `GET  /`                     welcome message
//! - `GET  /health`               liveness plus LLM endpoint probes
//! - `GET  /api/products/search`  retrieval engine results
//! - `POST /api/products/reload`  re-read the catalog and rebuild the index
//! - `GET  /ws/{client_id}`       chat with the product agent
//! - `/static/*`                  static assets

mod core;
mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};

pub use crate::core::app_state::{AppConfig, AppState};
pub use crate::core::ws::connection_manager::ConnectionManager;
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{
    health_route::health_route,
    products::{
        reload_products_route::reload_products_route,
        search_products_route::search_products_route,
    },
    root_route::root_route,
    ws::chat_socket_route::chat_socket_route,
};

/// Builds the application router over shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_route))
        .route("/api/products/search", get(search_products_route))
        .route("/api/products/reload", post(reload_products_route))
        .route("/ws/{client_id}", get(chat_socket_route))
        .nest_service("/static", static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Loads state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env().await?);
    let address = state.config.address.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(target: "api", address = %address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api", "server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps
/// running until killed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!(target: "api", "shutdown signal received"),
        Err(err) => {
            error!(target: "api", error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
