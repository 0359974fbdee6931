//! Catalog store: loads the product file once and serves read-only lookups.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::errors::RagError;
use crate::record::{CatalogFile, ProductRecord};

/// Ordered, immutable set of products with an id lookup table.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Reads and validates `{ "products": [...] }` from `path`.
    ///
    /// # Errors
    /// Returns [`RagError::CatalogLoad`] when the file is missing, is not
    /// valid JSON, lacks a required field, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        debug!(target: "product_rag::catalog", path = %path.display(), "catalog::load: start");

        let raw = std::fs::read_to_string(path).map_err(|e| RagError::catalog(path, e))?;
        let file: CatalogFile = serde_json::from_str(&raw).map_err(|e| RagError::catalog(path, e))?;
        let catalog = Self::from_records(file.products).map_err(|e| match e {
            RagError::CatalogLoad { reason, .. } => RagError::catalog(path, reason),
            other => other,
        })?;

        info!(
            target: "product_rag::catalog",
            path = %path.display(),
            products = catalog.len(),
            "catalog::load: done"
        );
        Ok(catalog)
    }

    /// Builds a catalog from in-memory records, applying the same validation
    /// as [`Catalog::load`].
    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self, RagError> {
        let mut seen = HashSet::with_capacity(records.len());
        for (pos, r) in records.iter().enumerate() {
            let invalid = |reason: String| RagError::CatalogLoad {
                path: "<memory>".into(),
                reason: format!("product #{pos}: {reason}"),
            };
            if r.id.trim().is_empty() {
                return Err(invalid("empty id".into()));
            }
            if !seen.insert(r.id.as_str()) {
                return Err(invalid(format!("duplicate id `{}`", r.id)));
            }
            if r.name.trim().is_empty() {
                return Err(invalid(format!("`{}` has an empty name", r.id)));
            }
            if r.category.trim().is_empty() {
                return Err(invalid(format!("`{}` has an empty category", r.id)));
            }
            if !r.price.is_finite() || r.price < 0.0 {
                return Err(invalid(format!("`{}` has an invalid price {}", r.id, r.price)));
            }
        }

        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Ok(Self { records, by_id })
    }

    /// Records in catalog order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookup by id; absence is an expected outcome.
    pub fn get_by_id(&self, id: &str) -> Option<&ProductRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// All records of `category` (case-insensitive), in catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&ProductRecord> {
        let want = category.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.category.to_lowercase() == want)
            .collect()
    }

    /// Case-insensitive substring match over name, category, description and
    /// scalar spec values. A blank keyword matches nothing.
    pub fn match_keyword(&self, keyword: &str) -> Vec<&ProductRecord> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.category.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r
                        .specs
                        .values()
                        .filter_map(|v| v.as_text())
                        .any(|v| v.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
