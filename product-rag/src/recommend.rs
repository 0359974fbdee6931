//! Keyword scoring for product recommendations.

use crate::catalog::Catalog;
use crate::record::ProductRecord;

/// Upper bound on recommended products.
pub const MAX_RECOMMENDATIONS: usize = 3;

const DESCRIPTION_HIT: u32 = 2;
const SPEC_HIT: u32 = 1;

/// A scored candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation<'c> {
    pub record: &'c ProductRecord,
    pub score: u32,
}

/// Scores one record against lowercased requirement tokens.
///
/// +2 once if any token occurs in the description, +1 for each scalar spec
/// value that contains at least one token.
pub fn score(record: &ProductRecord, tokens: &[String]) -> u32 {
    if tokens.is_empty() {
        return 0;
    }
    let hit = |text: &str| {
        let lower = text.to_lowercase();
        tokens.iter().any(|t| lower.contains(t.as_str()))
    };

    let mut total = 0;
    if hit(&record.description) {
        total += DESCRIPTION_HIT;
    }
    total += SPEC_HIT
        * record
            .specs
            .values()
            .filter_map(|v| v.as_text())
            .filter(|v| hit(v))
            .count() as u32;
    total
}

/// Top [`MAX_RECOMMENDATIONS`] records by descending score. Records scoring
/// zero are dropped; equal scores keep catalog order.
pub fn recommend<'c>(catalog: &'c Catalog, requirements: &str) -> Vec<Recommendation<'c>> {
    let tokens: Vec<String> = requirements
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut scored: Vec<Recommendation<'c>> = catalog
        .records()
        .iter()
        .map(|record| Recommendation {
            record,
            score: score(record, &tokens),
        })
        .filter(|r| r.score > 0)
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}
