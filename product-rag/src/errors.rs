//! Unified error types for the crate.

use std::path::Path;

use thiserror::Error;

/// Top-level error for product retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Catalog source is missing, unreadable, or malformed. Fatal at startup.
    #[error("catalog load failed ({path}): {reason}")]
    CatalogLoad { path: String, reason: String },

    /// Search attempted before the vector index was built.
    #[error("vector index is not built yet")]
    IndexNotReady,

    /// Embedding backend failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Caller supplied an unusable query (blank text, `k == 0`).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected failure inside the index or formatting.
    #[error("internal: {0}")]
    Internal(String),
}

impl RagError {
    pub(crate) fn catalog(path: &Path, reason: impl std::fmt::Display) -> Self {
        RagError::CatalogLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<ai_llm_service::AiLlmError> for RagError {
    fn from(err: ai_llm_service::AiLlmError) -> Self {
        RagError::Embedding(err.to_string())
    }
}
