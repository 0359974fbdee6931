//! Core data models used by the library.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Spec entries in catalog-file order.
pub type SpecMap = IndexMap<String, SpecValue>;

/// A spec value: either a scalar string or an ordered list (e.g. `features`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    List(Vec<String>),
}

impl SpecValue {
    /// Scalar text, `None` for lists. Keyword scoring only looks at scalars.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => Some(s),
            SpecValue::List(_) => None,
        }
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Text(s) => f.write_str(s),
            SpecValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// One product of the catalog. Immutable after load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub warranty: String,
    #[serde(default)]
    pub specs: SpecMap,
}

impl ProductRecord {
    /// Price without a trailing `.0` for whole amounts (`32900`, `19.5`).
    pub fn price_display(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{:.0}", self.price)
        } else {
            format!("{}", self.price)
        }
    }
}

/// On-disk catalog shape: `{ "products": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    pub products: Vec<ProductRecord>,
}

/// Which view of a product a projected document carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    BasicInfo,
    Specs,
    Description,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::BasicInfo => "basic_info",
            DocType::Specs => "specs",
            DocType::Description => "description",
        }
    }
}

/// Metadata carried by every projected document and inherited by its chunks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
}

/// A text view of a product prepared for indexing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDocument {
    pub content: String,
    pub metadata: DocMetadata,
}

/// A document returned by the vector index with its distance (lower = closer).
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredDocument {
    pub document: ProjectedDocument,
    pub score: f32,
}

/// Metadata attached to a search result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

/// A single entry of a search response.
///
/// `relevance_score` is present only for similarity hits and carries the
/// index distance unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub metadata: ResultMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
}

/// Summary statistics for a full (re)index operation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub products: usize,
    pub documents: usize,
    pub chunks: usize,
    pub duration_ms: u128,
}
