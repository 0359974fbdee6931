use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::products::reload_products_response::ReloadProductsResponse,
};

/// Re-reads the catalog and rebuilds the index. Searches issued meanwhile
/// wait for the new snapshot.
pub async fn reload_products_route(State(state): State<Arc<AppState>>) -> Response {
    info!(target: "api::products", "reload_products_route: start");

    match state.store.reload().await {
        Ok(stats) => {
            let body = ReloadProductsResponse {
                message: "Catalog reloaded successfully".to_string(),
                products: stats.products,
                documents: stats.documents,
                chunks: stats.chunks,
                duration_ms: stats.duration_ms,
                reloaded_at: chrono::Utc::now()
                    .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            };
            ApiResponse::success(body).into_response_with_status(StatusCode::OK)
        }
        Err(err) => {
            error!(
                target: "api::products",
                error = %err,
                "reload_products_route: reload failed"
            );
            let resp: ApiResponse<()> =
                ApiResponse::error("RELOAD_FAILED", format!("Reload failed: {err}"));
            resp.into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
