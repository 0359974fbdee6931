//! Result assembly for each retrieval strategy.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::projector::{format_basic_info, format_spec_listing};
use crate::record::{DocType, ProductRecord, ResultMetadata, ScoredDocument, SearchResult};

/// Single-result answer to a stock question.
pub fn stock_result(record: &ProductRecord) -> SearchResult {
    SearchResult {
        content: format!("{} currently has {} units in stock", record.name, record.stock),
        metadata: ResultMetadata {
            id: record.id.clone(),
            name: record.name.clone(),
            doc_type: None,
            stock: Some(record.stock),
        },
        relevance_score: None,
    }
}

/// Single-result full spec listing.
pub fn spec_result(record: &ProductRecord) -> SearchResult {
    SearchResult {
        content: format_spec_listing(record),
        metadata: ResultMetadata {
            id: record.id.clone(),
            name: record.name.clone(),
            doc_type: Some(DocType::Specs),
            stock: None,
        },
        relevance_score: None,
    }
}

/// One basic-info result per record, in the given order.
pub fn listing_results<'a>(records: impl IntoIterator<Item = &'a ProductRecord>) -> Vec<SearchResult> {
    records
        .into_iter()
        .map(|record| SearchResult {
            content: format_basic_info(record),
            metadata: ResultMetadata {
                id: record.id.clone(),
                name: record.name.clone(),
                doc_type: Some(DocType::BasicInfo),
                stock: None,
            },
            relevance_score: None,
        })
        .collect()
}

/// Keeps the first hit per product id, preserving index order.
pub fn dedup_by_product(hits: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|h| seen.insert(h.document.metadata.id.clone()))
        .collect()
}

/// Turns raw index hits into search results.
///
/// With `spec_intent`, a `specs` hit is replaced by the product's full spec
/// listing while keeping its score. A hit whose product is no longer in the
/// catalog keeps its indexed content.
pub fn similarity_results(
    catalog: &Catalog,
    hits: Vec<ScoredDocument>,
    spec_intent: bool,
) -> Vec<SearchResult> {
    let raw = hits.len();
    let results: Vec<SearchResult> = dedup_by_product(hits)
        .into_iter()
        .map(|hit| {
            let meta = hit.document.metadata;
            let expanded = (spec_intent && meta.doc_type == DocType::Specs)
                .then(|| catalog.get_by_id(&meta.id))
                .flatten()
                .map(format_spec_listing);
            SearchResult {
                content: expanded.unwrap_or(hit.document.content),
                metadata: ResultMetadata {
                    id: meta.id,
                    name: meta.name,
                    doc_type: Some(meta.doc_type),
                    stock: None,
                },
                relevance_score: Some(hit.score),
            }
        })
        .collect();
    debug!(raw, unique = results.len(), spec_intent, "retrieve::similarity_results");
    results
}
