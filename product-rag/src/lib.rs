//! Product catalog retrieval: loading, projection, indexing and routing.
//!
//! This crate provides:
//! - A validated, read-only product [`Catalog`] loaded from JSON
//! - Three text views per product, chunked and stored in a [`VectorIndex`]
//! - Rule-based query routing (stock / spec / listing / similarity)
//! - Keyword-scored recommendations
//!
//! [`ProductStore`] is the single entry point for application code. It owns
//! the catalog snapshot and serializes reloads against searches.

mod catalog;
mod chunker;
mod classifier;
mod config;
mod embed;
mod errors;
mod index;
mod projector;
mod recommend;
mod record;
mod retrieve;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use chunker::TextChunker;
pub use classifier::{QueryClassifier, Strategy};
pub use config::{EmbeddingBackend, RagConfig};
pub use embed::{EmbeddingsProvider, hash::HashEmbedder, ollama::OllamaEmbedder};
pub use errors::RagError;
pub use index::{InMemoryVectorIndex, VectorIndex, cosine_distance};
pub use projector::{format_basic_info, format_spec_listing, format_specs, project, spec_label};
pub use recommend::{MAX_RECOMMENDATIONS, Recommendation};
pub use record::{
    DocMetadata, DocType, IndexStats, ProductRecord, ProjectedDocument, ResultMetadata,
    ScoredDocument, SearchResult, SpecMap, SpecValue,
};

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// High-level facade over catalog, index and classifier.
pub struct ProductStore {
    cfg: RagConfig,
    catalog: RwLock<Arc<Catalog>>,
    index: Arc<dyn VectorIndex>,
    classifier: QueryClassifier,
    chunker: TextChunker,
    build_lock: Mutex<()>,
}

impl ProductStore {
    /// Wraps an already-loaded catalog. The index is built lazily on the
    /// first similarity search, or eagerly via [`ProductStore::rebuild_index`].
    pub fn new(cfg: RagConfig, catalog: Catalog, index: Arc<dyn VectorIndex>) -> Self {
        let chunker = TextChunker::new(cfg.chunk_size, cfg.chunk_overlap);
        Self {
            cfg,
            catalog: RwLock::new(Arc::new(catalog)),
            index,
            classifier: QueryClassifier::default(),
            chunker,
            build_lock: Mutex::new(()),
        }
    }

    /// Replaces the default classifier.
    pub fn with_classifier(mut self, classifier: QueryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Loads the catalog from `cfg.catalog_path` and builds the index.
    ///
    /// # Errors
    /// Returns [`RagError::CatalogLoad`] for a missing or malformed catalog,
    /// or the index error when embedding fails.
    pub async fn open(cfg: RagConfig, index: Arc<dyn VectorIndex>) -> Result<Self, RagError> {
        cfg.validate()?;
        let catalog = Catalog::load(&cfg.catalog_path)?;
        let store = Self::new(cfg, catalog, index);
        store.rebuild_index().await?;
        Ok(store)
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Current catalog snapshot.
    pub async fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    pub async fn get_by_id(&self, id: &str) -> Option<ProductRecord> {
        self.catalog.read().await.get_by_id(id).cloned()
    }

    /// Re-indexes the current catalog.
    pub async fn rebuild_index(&self) -> Result<IndexStats, RagError> {
        let catalog = self.catalog.read().await;
        self.build_index(&catalog).await
    }

    /// Re-reads the catalog file and rebuilds the index.
    ///
    /// Holds the catalog write lock for the whole operation, so concurrent
    /// searches wait and then observe the new snapshot. On failure the
    /// previous catalog and index stay in place.
    pub async fn reload(&self) -> Result<IndexStats, RagError> {
        let mut guard = self.catalog.write().await;
        info!(target: "product_rag", path = %self.cfg.catalog_path.display(), "reload: start");

        let fresh = Catalog::load(&self.cfg.catalog_path)?;
        let stats = self.build_index(&fresh).await?;
        *guard = Arc::new(fresh);

        info!(
            target: "product_rag",
            products = stats.products,
            chunks = stats.chunks,
            "reload: done"
        );
        Ok(stats)
    }

    /// Routes `query` to a strategy and assembles results.
    ///
    /// An empty result set is a success. A similarity search against an
    /// unbuilt index builds it once and retries once.
    ///
    /// # Errors
    /// [`RagError::InvalidRequest`] for a blank query or `k == 0`; index or
    /// embedding errors otherwise.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, RagError> {
        if query.trim().is_empty() {
            return Err(RagError::InvalidRequest("query must not be empty".into()));
        }
        if k == 0 {
            return Err(RagError::InvalidRequest("k must be >= 1".into()));
        }

        let catalog = self.catalog.read().await;
        let strategy = self.classifier.classify(query, &catalog);
        debug!(target: "product_rag", strategy = strategy.name(), k, "search: routed");

        let results = match strategy {
            Strategy::StockLookup(record) => vec![retrieve::stock_result(record)],
            Strategy::SpecLookup(record) => vec![retrieve::spec_result(record)],
            Strategy::CategoryListing { category: Some(category) } => {
                retrieve::listing_results(catalog.by_category(&category))
            }
            Strategy::CategoryListing { category: None } => {
                retrieve::listing_results(catalog.records())
            }
            Strategy::SimilaritySearch { spec_intent } => {
                let hits = match self.index.search(query, k).await {
                    Err(RagError::IndexNotReady) => {
                        warn!(target: "product_rag", "search: index not ready, building");
                        self.ensure_index(&catalog).await?;
                        self.index.search(query, k).await?
                    }
                    other => other?,
                };
                retrieve::similarity_results(&catalog, hits, spec_intent)
            }
        };

        info!(target: "product_rag", results = results.len(), "search: done");
        Ok(results)
    }

    /// Keyword-scored top products for free-text requirements.
    pub async fn recommend(&self, requirements: &str) -> Vec<ProductRecord> {
        let catalog = self.catalog.read().await;
        recommend::recommend(&catalog, requirements)
            .into_iter()
            .map(|r| r.record.clone())
            .collect()
    }

    /// Structured product lookup: a listing query returns its category (or
    /// the whole catalog), anything else is a substring match.
    pub async fn find_products(&self, query: &str) -> Vec<ProductRecord> {
        let catalog = self.catalog.read().await;
        if !self.classifier.is_listing_query(query) {
            return catalog.match_keyword(query).into_iter().cloned().collect();
        }
        match self.classifier.category_for(query) {
            Some(category) => catalog.by_category(category).into_iter().cloned().collect(),
            None => catalog.records().to_vec(),
        }
    }

    /* --------------------- Internals --------------------- */

    async fn ensure_index(&self, catalog: &Catalog) -> Result<(), RagError> {
        let _guard = self.build_lock.lock().await;
        if self.index.is_ready().await {
            return Ok(());
        }
        self.build_index(catalog).await.map(|_| ())
    }

    async fn build_index(&self, catalog: &Catalog) -> Result<IndexStats, RagError> {
        let started = Instant::now();
        let documents: Vec<ProjectedDocument> =
            catalog.records().iter().flat_map(project).collect();
        let chunks = self.chunker.chunk_documents(&documents);

        let stats = IndexStats {
            products: catalog.len(),
            documents: documents.len(),
            chunks: chunks.len(),
            duration_ms: 0,
        };
        self.index.index(chunks).await?;

        let stats = IndexStats {
            duration_ms: started.elapsed().as_millis(),
            ..stats
        };
        info!(
            target: "product_rag",
            products = stats.products,
            documents = stats.documents,
            chunks = stats.chunks,
            duration_ms = stats.duration_ms as u64,
            "index built"
        );
        Ok(stats)
    }
}
