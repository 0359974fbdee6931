//! Query intent routing.
//!
//! An ordered rule table maps a free-text query to a retrieval strategy. The
//! first rule that fires wins:
//!
//! 1. stock trigger + product name  -> [`Strategy::StockLookup`]
//! 2. spec trigger + product name   -> [`Strategy::SpecLookup`]
//! 3. listing trigger               -> [`Strategy::CategoryListing`]
//! 4. otherwise                     -> [`Strategy::SimilaritySearch`]
//!
//! Triggers and category keywords match the lowercased query; product names
//! must appear verbatim in the raw query.

use crate::catalog::Catalog;
use crate::record::ProductRecord;

/// Trigger substrings asking how many units are left.
pub const STOCK_TRIGGERS: &[&str] = &["庫存", "剩下", "還有", "stock", "remaining", "how many left"];

/// Trigger substrings asking for a specification sheet.
pub const SPEC_TRIGGERS: &[&str] = &["規格", "specs", "specification"];

/// Trigger substrings asking for a listing.
pub const LISTING_TRIGGERS: &[&str] = &["有哪些", "列出", "所有", "list all", "show all"];

/// Keyword to category table, checked in order. `headphone` precedes
/// `phone` because the latter is a substring of the former.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("耳機", "headphone"),
    ("手機", "phone"),
    ("筆記型電腦", "laptop"),
    ("筆記本", "laptop"),
    ("筆電", "laptop"),
    ("電腦", "laptop"),
    ("headphone", "headphone"),
    ("earphone", "headphone"),
    ("earbud", "headphone"),
    ("laptop", "laptop"),
    ("notebook", "laptop"),
    ("phone", "phone"),
];

/// Retrieval strategy chosen for a query.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy<'c> {
    StockLookup(&'c ProductRecord),
    SpecLookup(&'c ProductRecord),
    /// `None` lists the whole catalog.
    CategoryListing { category: Option<String> },
    /// `spec_intent` enables re-expansion of `specs` hits.
    SimilaritySearch { spec_intent: bool },
}

impl Strategy<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::StockLookup(_) => "stock_lookup",
            Strategy::SpecLookup(_) => "spec_lookup",
            Strategy::CategoryListing { .. } => "category_listing",
            Strategy::SimilaritySearch { .. } => "similarity_search",
        }
    }
}

/// Lowercased and raw forms of the query, computed once.
struct Query<'q> {
    raw: &'q str,
    lower: String,
}

type Rule = for<'c> fn(&QueryClassifier, &Query<'_>, &'c Catalog) -> Option<Strategy<'c>>;

/// Deterministic rule-based classifier.
#[derive(Clone, Debug)]
pub struct QueryClassifier {
    stock_triggers: Vec<String>,
    spec_triggers: Vec<String>,
    listing_triggers: Vec<String>,
    category_keywords: Vec<(String, String)>,
}

impl Default for QueryClassifier {
    fn default() -> Self {
        let owned = |xs: &[&str]| -> Vec<String> { xs.iter().map(|s| s.to_lowercase()).collect() };
        Self {
            stock_triggers: owned(STOCK_TRIGGERS),
            spec_triggers: owned(SPEC_TRIGGERS),
            listing_triggers: owned(LISTING_TRIGGERS),
            category_keywords: CATEGORY_KEYWORDS
                .iter()
                .map(|(k, c)| (k.to_lowercase(), (*c).to_string()))
                .collect(),
        }
    }
}

impl QueryClassifier {
    const RULES: [Rule; 3] = [Self::stock_rule, Self::spec_rule, Self::listing_rule];

    /// Replaces the keyword to category table; order is preserved.
    pub fn with_category_keywords(mut self, table: Vec<(String, String)>) -> Self {
        self.category_keywords = table
            .into_iter()
            .map(|(k, c)| (k.to_lowercase(), c))
            .collect();
        self
    }

    pub fn classify<'c>(&self, query: &str, catalog: &'c Catalog) -> Strategy<'c> {
        let q = Query {
            raw: query,
            lower: query.to_lowercase(),
        };
        Self::RULES
            .iter()
            .find_map(|rule| rule(self, &q, catalog))
            .unwrap_or(Strategy::SimilaritySearch {
                spec_intent: self.has_spec_intent(&q.lower),
            })
    }

    /// True when the query asks for a listing.
    pub fn is_listing_query(&self, query: &str) -> bool {
        contains_any(&query.to_lowercase(), &self.listing_triggers)
    }

    /// Category selected by the first matching keyword, if any.
    pub fn category_for(&self, query: &str) -> Option<&str> {
        let lower = query.to_lowercase();
        self.category_keywords
            .iter()
            .find(|(kw, _)| lower.contains(kw.as_str()))
            .map(|(_, cat)| cat.as_str())
    }

    fn has_spec_intent(&self, lower: &str) -> bool {
        contains_any(lower, &self.spec_triggers)
    }

    fn stock_rule<'c>(&self, q: &Query<'_>, catalog: &'c Catalog) -> Option<Strategy<'c>> {
        if !contains_any(&q.lower, &self.stock_triggers) {
            return None;
        }
        named_product(q.raw, catalog).map(Strategy::StockLookup)
    }

    fn spec_rule<'c>(&self, q: &Query<'_>, catalog: &'c Catalog) -> Option<Strategy<'c>> {
        if !self.has_spec_intent(&q.lower) {
            return None;
        }
        named_product(q.raw, catalog).map(Strategy::SpecLookup)
    }

    fn listing_rule<'c>(&self, q: &Query<'_>, _catalog: &'c Catalog) -> Option<Strategy<'c>> {
        if !contains_any(&q.lower, &self.listing_triggers) {
            return None;
        }
        Some(Strategy::CategoryListing {
            category: self.category_for(q.raw).map(str::to_string),
        })
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// First record, in catalog order, whose name appears in the raw query.
fn named_product<'c>(raw: &str, catalog: &'c Catalog) -> Option<&'c ProductRecord> {
    catalog
        .records()
        .iter()
        .find(|r| !r.name.is_empty() && raw.contains(r.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    #[test]
    fn stock_trigger_with_name_is_a_stock_lookup() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("PhoneX 庫存還有多少", &catalog);
        assert!(matches!(s, Strategy::StockLookup(r) if r.id == "p1"));
    }

    #[test]
    fn stock_beats_spec_when_both_trigger() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("LaptopY specs and stock", &catalog);
        assert!(matches!(s, Strategy::StockLookup(r) if r.id == "p2"));
    }

    #[test]
    fn spec_trigger_with_name_is_a_spec_lookup() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("PhoneX 規格", &catalog);
        assert!(matches!(s, Strategy::SpecLookup(r) if r.id == "p1"));
    }

    #[test]
    fn names_must_match_verbatim() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("phonex stock", &catalog);
        assert_eq!(s, Strategy::SimilaritySearch { spec_intent: false });
    }

    #[test]
    fn spec_trigger_without_name_falls_through_with_spec_intent() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("which phone has the best specs", &catalog);
        assert_eq!(s, Strategy::SimilaritySearch { spec_intent: true });
    }

    #[test]
    fn listing_selects_first_matching_category() {
        let catalog = sample_catalog();
        let c = QueryClassifier::default();
        assert_eq!(
            c.classify("list all laptops", &catalog),
            Strategy::CategoryListing { category: Some("laptop".into()) }
        );
        assert_eq!(
            c.classify("列出所有耳機", &catalog),
            Strategy::CategoryListing { category: Some("headphone".into()) }
        );
        assert_eq!(
            c.classify("show all headphones", &catalog),
            Strategy::CategoryListing { category: Some("headphone".into()) }
        );
    }

    #[test]
    fn listing_without_category_lists_everything() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("有哪些商品", &catalog);
        assert_eq!(s, Strategy::CategoryListing { category: None });
    }

    #[test]
    fn custom_keyword_table_keeps_order() {
        let c = QueryClassifier::default().with_category_keywords(vec![
            ("Tab".into(), "tablet".into()),
            ("table".into(), "furniture".into()),
        ]);
        assert_eq!(c.category_for("a table"), Some("tablet"));
    }

    #[test]
    fn plain_query_is_similarity_search() {
        let catalog = sample_catalog();
        let s = QueryClassifier::default().classify("something lightweight for travel", &catalog);
        assert_eq!(s.name(), "similarity_search");
    }
}
