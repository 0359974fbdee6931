//! `product_recommendation`: keyword-scored top picks.

use std::sync::Arc;

use futures::future::BoxFuture;
use product_rag::ProductStore;
use tracing::debug;

use super::{Tool, format_summary};
use crate::errors::AgentError;

pub const HEADER: &str = "Based on your requirements, I recommend the following products:";
pub const NO_MATCH: &str = "No products match your requirements";

pub struct ProductRecommendationTool {
    store: Arc<ProductStore>,
}

impl ProductRecommendationTool {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }
}

impl Tool for ProductRecommendationTool {
    fn name(&self) -> &'static str {
        "product_recommendation"
    }

    fn description(&self) -> &'static str {
        "Recommend up to three products matching the customer's requirements, e.g. \"lightweight long battery\"."
    }

    fn invoke<'a>(&'a self, argument: &'a str) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async move {
            let picks = self.store.recommend(argument).await;
            debug!(target: "product_agent::tools", requirements = argument, picks = picks.len(), "product_recommendation");
            if picks.is_empty() {
                return Ok(NO_MATCH.to_string());
            }
            let mut parts = vec![HEADER.to_string()];
            parts.extend(picks.iter().map(|r| format!("\n{}", format_summary(r))));
            Ok(parts.join("\n"))
        })
    }
}
