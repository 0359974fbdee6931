use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReloadProductsResponse {
    pub message: String,
    pub products: usize,
    pub documents: usize,
    pub chunks: usize,
    pub duration_ms: u128,
    /// RFC3339 UTC completion time.
    pub reloaded_at: String,
}
