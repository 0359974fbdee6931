//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use tokio::sync::Notify;

use crate::catalog::Catalog;
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::record::{ProductRecord, ProjectedDocument, ScoredDocument, SpecMap, SpecValue};

pub(crate) fn record(id: &str, name: &str, category: &str, stock: u32) -> ProductRecord {
    ProductRecord {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        price: 100.0,
        stock,
        description: String::new(),
        warranty: "1 year".into(),
        specs: SpecMap::new(),
    }
}

/// `p1` PhoneX (phone, 5 in stock, 8GB ram) and `p2` LaptopY (laptop, none left).
pub(crate) fn sample_records() -> Vec<ProductRecord> {
    let mut phone = record("p1", "PhoneX", "phone", 5);
    phone
        .specs
        .insert("ram".into(), SpecValue::Text("8GB".into()));
    vec![phone, record("p2", "LaptopY", "laptop", 0)]
}

pub(crate) fn sample_catalog() -> Catalog {
    match Catalog::from_records(sample_records()) {
        Ok(c) => c,
        Err(e) => panic!("fixture catalog is invalid: {e}"),
    }
}

/// Holds a build open: `index` signals `started`, then waits for `release`.
#[derive(Default)]
pub(crate) struct BuildGate {
    pub started: Notify,
    pub release: Notify,
}

/// Index double returning canned hits; starts unbuilt unless `ready`.
pub(crate) struct FakeIndex {
    pub hits: Vec<ScoredDocument>,
    pub ready: Mutex<bool>,
    pub index_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub indexed: Mutex<Vec<ProjectedDocument>>,
    gate: Option<Arc<BuildGate>>,
}

impl FakeIndex {
    pub(crate) fn new(hits: Vec<ScoredDocument>, ready: bool) -> Self {
        Self {
            hits,
            ready: Mutex::new(ready),
            index_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            indexed: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Like [`FakeIndex::new`], but every `index` call blocks on the gate.
    pub(crate) fn gated(hits: Vec<ScoredDocument>, ready: bool) -> (Self, Arc<BuildGate>) {
        let gate = Arc::new(BuildGate::default());
        let index = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new(hits, ready)
        };
        (index, gate)
    }

    fn is_built(&self) -> bool {
        self.ready.lock().map(|g| *g).unwrap_or(false)
    }
}

impl VectorIndex for FakeIndex {
    fn index<'a>(&'a self, documents: Vec<ProjectedDocument>) -> BoxFuture<'a, Result<usize, RagError>> {
        Box::pin(async move {
            self.index_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.started.notify_one();
                gate.release.notified().await;
            }
            let n = documents.len();
            if let Ok(mut slot) = self.indexed.lock() {
                *slot = documents;
            }
            if let Ok(mut r) = self.ready.lock() {
                *r = true;
            }
            Ok(n)
        })
    }

    fn search<'a>(
        &'a self,
        _query: &'a str,
        k: usize,
    ) -> BoxFuture<'a, Result<Vec<ScoredDocument>, RagError>> {
        Box::pin(async move {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if !self.is_built() {
                return Err(RagError::IndexNotReady);
            }
            Ok(self.hits.iter().take(k).cloned().collect())
        })
    }

    fn is_ready(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.is_built() })
    }
}
