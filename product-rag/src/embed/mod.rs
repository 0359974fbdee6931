use std::{future::Future, pin::Pin};

use crate::errors::RagError;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in another embedding backend. Async because
/// real providers (Ollama) perform HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one text into a dense vector.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>;

    /// Output dimension every vector of this provider has.
    fn dim(&self) -> usize;
}

pub mod hash;
pub mod ollama;
