use serde::Deserialize;

/// Query string of `GET /api/products/search`.
///
/// Both fields are optional at the extractor level so that missing or
/// out-of-range values get a descriptive 400 instead of a rejection.
#[derive(Debug, Deserialize)]
pub struct SearchProductsQuery {
    pub query: Option<String>,
    pub k: Option<i64>,
}
