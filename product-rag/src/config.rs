//! Runtime configuration for catalog loading, chunking and retrieval.

use std::path::PathBuf;

use crate::errors::RagError;

/// Which embedding backend turns text into vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// Deterministic feature-hashing embedder; no network.
    Hash,
    /// Ollama embedding model configured through `EMBEDDING_MODEL`.
    Ollama,
}

impl EmbeddingBackend {
    fn parse(raw: &str) -> Result<Self, RagError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "ollama" => Ok(Self::Ollama),
            other => Err(RagError::Config(format!(
                "EMBEDDING_BACKEND must be `hash` or `ollama`, got `{other}`"
            ))),
        }
    }
}

/// Configuration for ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// JSON catalog file `{ "products": [...] }`.
    pub catalog_path: PathBuf,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks.
    pub chunk_overlap: usize,
    /// Default `k` for similarity search when the caller does not pass one.
    pub default_top_k: usize,
    pub embedding_backend: EmbeddingBackend,
    /// Vector dimension; enforced on every embedding.
    pub embedding_dim: usize,
    /// Maximum in-flight embedding requests while indexing.
    pub embedding_concurrency: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/products.json"),
            chunk_size: 500,
            chunk_overlap: 100,
            default_top_k: 3,
            embedding_backend: EmbeddingBackend::Hash,
            embedding_dim: 384,
            embedding_concurrency: 4,
        }
    }
}

impl RagConfig {
    /// Same as [`Default`] but pointing at the given catalog file.
    pub fn with_catalog(path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: path.into(),
            ..Self::default()
        }
    }

    /// Builds the configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    /// Returns [`RagError::Config`] for unparsable numbers, unknown backends,
    /// or values rejected by [`RagConfig::validate`].
    pub fn from_env() -> Result<Self, RagError> {
        let d = Self::default();
        let cfg = Self {
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(d.catalog_path),
            chunk_size: env_usize("RAG_CHUNK_SIZE", d.chunk_size)?,
            chunk_overlap: env_usize("RAG_CHUNK_OVERLAP", d.chunk_overlap)?,
            default_top_k: env_usize("RAG_TOP_K", d.default_top_k)?,
            embedding_backend: match std::env::var("EMBEDDING_BACKEND") {
                Ok(raw) if !raw.trim().is_empty() => EmbeddingBackend::parse(&raw)?,
                _ => d.embedding_backend,
            },
            embedding_dim: env_usize("EMBEDDING_DIM", d.embedding_dim)?,
            embedding_concurrency: env_usize("EMBEDDING_CONCURRENCY", d.embedding_concurrency)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(
                "chunk_overlap must be smaller than chunk_size".into(),
            ));
        }
        if self.default_top_k == 0 {
            return Err(RagError::Config("default_top_k must be > 0".into()));
        }
        if self.embedding_dim == 0 {
            return Err(RagError::Config("embedding_dim must be > 0".into()));
        }
        Ok(())
    }
}

fn env_usize(name: &str, default: usize) -> Result<usize, RagError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<usize>()
            .map_err(|e| RagError::Config(format!("{name}: {e}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = RagConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.chunk_size, 500);
        assert_eq!(cfg.chunk_overlap, 100);
        assert_eq!(cfg.default_top_k, 3);
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        let cfg = RagConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..RagConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RagError::Config(_))));
    }

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(EmbeddingBackend::parse("Ollama").ok(), Some(EmbeddingBackend::Ollama));
        assert_eq!(EmbeddingBackend::parse(" hash ").ok(), Some(EmbeddingBackend::Hash));
        assert!(EmbeddingBackend::parse("openai").is_err());
    }
}
