use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use product_rag::{RagError, SearchResult};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::products::search_products_request::SearchProductsQuery,
};

pub async fn search_products_route(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchProductsQuery>, QueryRejection>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let Query(p) = params?;

    let query = p
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("`query` must be a non-empty string".into()))?;
    let k = match p.k {
        None => state.store.config().default_top_k,
        Some(k) if k >= 1 => k as usize,
        Some(k) => return Err(AppError::BadRequest(format!("`k` must be >= 1, got {k}"))),
    };

    debug!(target: "api::products", query = %query, k, "search_products_route: start");

    match state.store.search(&query, k).await {
        Ok(results) => {
            debug!(
                target: "api::products",
                hits = results.len(),
                "search_products_route: success"
            );
            Ok(Json(results))
        }
        Err(RagError::InvalidRequest(msg)) => Err(AppError::BadRequest(msg)),
        Err(err) => {
            error!(
                target: "api::products",
                error = %err,
                "search_products_route: search failed"
            );
            Err(AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "SEARCH_FAILED",
                message: format!("Search failed: {err}"),
            })
        }
    }
}
