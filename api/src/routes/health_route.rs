use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::debug;

use crate::core::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub llm: Vec<HealthStatus>,
}

/// Always `healthy` while the server answers; LLM probes are informational.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let llm = state.llm.health_all().await;
    debug!(
        target: "api::health",
        probes = llm.len(),
        ok = llm.iter().all(|s| s.ok),
        "health_route"
    );
    Json(HealthResponse {
        status: "healthy",
        llm,
    })
}
