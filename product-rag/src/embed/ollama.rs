//! Ollama embedding provider implementation.
//!
//! Delegates to the shared [`LlmServiceProfiles`] embedding profile and
//! enforces the configured vector dimension.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::service_profiles::LlmServiceProfiles;
use tracing::warn;

use crate::{EmbeddingsProvider, RagError};

/// Ollama embedding provider (async).
#[derive(Clone, Debug)]
pub struct OllamaEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl OllamaEmbedder {
    /// Wraps the shared service; `dim` is the expected embedding size.
    ///
    /// # Errors
    /// Returns [`RagError::Config`] when the service has no embedding profile.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Result<Self, RagError> {
        if svc.profiles().1.is_none() {
            return Err(RagError::Config(
                "ollama embedding backend requires EMBEDDING_MODEL".into(),
            ));
        }
        Ok(Self { svc, dim })
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self.svc.embed(text).await?;

            if resp.len() != self.dim {
                warn!(got = resp.len(), want = self.dim, "ollama embedding size mismatch");
                return Err(RagError::VectorSizeMismatch {
                    got: resp.len(),
                    want: self.dim,
                });
            }

            Ok(resp)
        })
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{LlmModelConfig, LlmProvider};

    use super::*;

    fn chat_cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "mistral".into(),
            endpoint: "http://localhost:11434".into(),
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(1),
        }
    }

    #[test]
    fn requires_an_embedding_profile() {
        let svc = Arc::new(LlmServiceProfiles::new(chat_cfg(), None, Some(1)).expect("svc"));
        assert!(matches!(OllamaEmbedder::new(svc, 768), Err(RagError::Config(_))));
    }
}
