//! Error types for the agent crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Chat model call failed.
    #[error("chat model error: {0}")]
    Llm(#[from] AiLlmError),

    /// Catalog lookup behind a tool failed.
    #[error("tool `{tool}` failed: {reason}")]
    Tool { tool: String, reason: String },

    /// Invalid agent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The model produced nothing usable and no tool output exists to fall back on.
    #[error("agent produced no answer")]
    NoAnswer,
}

impl From<product_rag::RagError> for AgentError {
    fn from(err: product_rag::RagError) -> Self {
        AgentError::Tool {
            tool: "catalog".into(),
            reason: err.to_string(),
        }
    }
}
