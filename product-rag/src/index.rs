//! Vector index: full-rebuild ingestion and top-k cosine search.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::{ProjectedDocument, ScoredDocument};

/// Storage and similarity search over projected documents.
///
/// `index` replaces all prior contents. `search` returns documents
/// best-match-first with a distance score (lower = more similar) and fails
/// with [`RagError::IndexNotReady`] until the first successful `index`.
pub trait VectorIndex: Send + Sync {
    fn index<'a>(&'a self, documents: Vec<ProjectedDocument>)
    -> BoxFuture<'a, Result<usize, RagError>>;

    fn search<'a>(
        &'a self,
        query: &'a str,
        k: usize,
    ) -> BoxFuture<'a, Result<Vec<ScoredDocument>, RagError>>;

    fn is_ready(&self) -> BoxFuture<'_, bool>;
}

struct Entry {
    document: ProjectedDocument,
    vector: Vec<f32>,
}

/// Brute-force in-process index.
///
/// A rebuild embeds everything first and swaps the entry list in one step,
/// so readers see either the previous snapshot or the new one.
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn EmbeddingsProvider>,
    concurrency: usize,
    entries: RwLock<Option<Arc<Vec<Entry>>>>,
}

impl InMemoryVectorIndex {
    pub fn new(embedder: Arc<dyn EmbeddingsProvider>, concurrency: usize) -> Self {
        Self {
            embedder,
            concurrency: concurrency.max(1),
            entries: RwLock::new(None),
        }
    }

    async fn build(&self, documents: Vec<ProjectedDocument>) -> Result<usize, RagError> {
        let want = self.embedder.dim();
        info!(
            target: "product_rag::index",
            documents = documents.len(),
            concurrency = self.concurrency,
            "index::build: start"
        );

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors: Vec<Vec<f32>> = stream::iter(texts)
            .map(|text| {
                let embedder = Arc::clone(&self.embedder);
                async move { embedder.embed(&text).await }
            })
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, RagError>>()?;

        let mut entries = Vec::with_capacity(documents.len());
        for (document, vector) in documents.into_iter().zip(vectors) {
            if vector.len() != want {
                return Err(RagError::VectorSizeMismatch {
                    got: vector.len(),
                    want,
                });
            }
            entries.push(Entry { document, vector });
        }

        let count = entries.len();
        *self.entries.write().await = Some(Arc::new(entries));
        info!(target: "product_rag::index", entries = count, "index::build: swapped");
        Ok(count)
    }

    async fn query(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, RagError> {
        let snapshot = self
            .entries
            .read()
            .await
            .clone()
            .ok_or(RagError::IndexNotReady)?;

        let qv = self.embedder.embed(query).await?;
        if qv.len() != self.embedder.dim() {
            return Err(RagError::VectorSizeMismatch {
                got: qv.len(),
                want: self.embedder.dim(),
            });
        }

        let mut scored: Vec<(usize, f32)> = snapshot
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_distance(&qv, &e.vector)))
            .collect();
        // Stable sort keeps insertion order among equal distances.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        let hits: Vec<ScoredDocument> = scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredDocument {
                document: snapshot[i].document.clone(),
                score,
            })
            .collect();
        debug!(target: "product_rag::index", k, hits = hits.len(), "index::search");
        Ok(hits)
    }
}

impl VectorIndex for InMemoryVectorIndex {
    fn index<'a>(
        &'a self,
        documents: Vec<ProjectedDocument>,
    ) -> BoxFuture<'a, Result<usize, RagError>> {
        Box::pin(self.build(documents))
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
        k: usize,
    ) -> BoxFuture<'a, Result<Vec<ScoredDocument>, RagError>> {
        Box::pin(self.query(query, k))
    }

    fn is_ready(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.entries.read().await.is_some() })
    }
}

/// `1 - cos(a, b)`; a zero vector is at distance 1 from everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 1.0;
    }
    1.0 - dot / (na.sqrt() * nb.sqrt())
}

#[cfg(test)]
mod tests {
    use std::{future::Future, pin::Pin};

    use super::*;
    use crate::embed::hash::HashEmbedder;
    use crate::record::{DocMetadata, DocType};

    fn doc(id: &str, content: &str) -> ProjectedDocument {
        ProjectedDocument {
            content: content.into(),
            metadata: DocMetadata {
                id: id.into(),
                name: id.into(),
                doc_type: DocType::Description,
            },
        }
    }

    fn index() -> InMemoryVectorIndex {
        InMemoryVectorIndex::new(Arc::new(HashEmbedder::new(128)), 2)
    }

    #[tokio::test]
    async fn search_before_index_is_not_ready() {
        let idx = index();
        assert!(!idx.is_ready().await);
        assert!(matches!(idx.search("x", 3).await, Err(RagError::IndexNotReady)));
    }

    #[tokio::test]
    async fn returns_best_match_first_with_distance_scores() {
        let idx = index();
        idx.index(vec![
            doc("a", "lightweight laptop with long battery"),
            doc("b", "wireless noise cancelling earbuds"),
        ])
        .await
        .expect("index");

        let hits = idx.search("noise cancelling earbuds", 2).await.expect("search");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document.metadata.id, "b");
        assert!(hits[0].score <= hits[1].score);
    }

    #[tokio::test]
    async fn equal_distances_keep_insertion_order() {
        let idx = index();
        idx.index(vec![doc("first", "same text"), doc("second", "same text")])
            .await
            .expect("index");
        let hits = idx.search("same text", 2).await.expect("search");
        let ids: Vec<_> = hits.iter().map(|h| h.document.metadata.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[tokio::test]
    async fn rebuild_replaces_previous_contents() {
        let idx = index();
        idx.index(vec![doc("old", "old text")]).await.expect("index");
        idx.index(vec![doc("new", "new text")]).await.expect("reindex");
        let hits = idx.search("old text", 5).await.expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.metadata.id, "new");
    }

    #[tokio::test]
    async fn empty_rebuild_is_ready_and_returns_nothing() {
        let idx = index();
        assert_eq!(idx.index(Vec::new()).await.expect("index"), 0);
        assert!(idx.is_ready().await);
        assert!(idx.search("anything", 3).await.expect("search").is_empty());
    }

    struct WrongDim;

    impl EmbeddingsProvider for WrongDim {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
            Box::pin(async { Ok(vec![1.0, 0.0]) })
        }

        fn dim(&self) -> usize {
            3
        }
    }

    #[tokio::test]
    async fn failed_rebuild_leaves_index_unbuilt() {
        let idx = InMemoryVectorIndex::new(Arc::new(WrongDim), 1);
        let err = idx.index(vec![doc("a", "x")]).await.err();
        assert!(matches!(err, Some(RagError::VectorSizeMismatch { got: 2, want: 3 })));
        assert!(!idx.is_ready().await);
    }

    #[test]
    fn cosine_distance_bounds() {
        assert!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }
}
