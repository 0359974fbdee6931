//! Offline embedder based on character n-gram feature hashing.
//!
//! Deterministic and dependency-free at runtime: the same text always maps to
//! the same unit-length vector, and texts sharing n-grams land close under
//! cosine distance. Used as the default backend and in tests.

use std::{future::Future, pin::Pin};

use crate::{EmbeddingsProvider, RagError};

/// Character unigram/bigram/trigram hashing into a fixed number of buckets.
#[derive(Clone, Debug)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    /// `dim == 0` is lifted to 1.
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    /// Synchronous embedding; the trait method wraps this.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        let normalized: Vec<char> = text
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .collect();

        for n in 1..=3 {
            if normalized.len() < n {
                break;
            }
            let weight = n as f32;
            for gram in normalized.windows(n) {
                if n > 1 && gram.iter().all(|c| c.is_whitespace()) {
                    continue;
                }
                let s: String = gram.iter().collect();
                let h = blake3::hash(s.as_bytes());
                let bytes = h.as_bytes();
                let mut word = [0u8; 8];
                word.copy_from_slice(&bytes[..8]);
                let bucket = (u64::from_le_bytes(word) % self.dim as u64) as usize;
                let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
                v[bucket] += sign * weight;
            }
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl EmbeddingsProvider for HashEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.embed_text(text)) })
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
