//! `product_search`: structured lookup by listing intent or keyword.

use std::sync::Arc;

use futures::future::BoxFuture;
use product_rag::ProductStore;
use tracing::debug;

use super::{Tool, format_with_specs};
use crate::errors::AgentError;

pub const NOT_FOUND: &str = "No matching products found";

pub struct ProductSearchTool {
    store: Arc<ProductStore>,
}

impl ProductSearchTool {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }
}

impl Tool for ProductSearchTool {
    fn name(&self) -> &'static str {
        "product_search"
    }

    fn description(&self) -> &'static str {
        "Search products by name, category or specification. Listing phrases such as \"list all laptops\" return a whole category."
    }

    fn invoke<'a>(&'a self, argument: &'a str) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async move {
            let products = self.store.find_products(argument).await;
            debug!(target: "product_agent::tools", query = argument, hits = products.len(), "product_search");
            if products.is_empty() {
                return Ok(NOT_FOUND.to_string());
            }
            Ok(products
                .iter()
                .map(format_with_specs)
                .collect::<Vec<_>>()
                .join("\n"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;

    #[tokio::test]
    async fn formats_matches_with_specs() {
        let tool = ProductSearchTool::new(store());
        let out = tool.invoke("PhoneX").await.expect("invoke");
        assert_eq!(
            out,
            "Product name: PhoneX\nCategory: phone\nPrice: NT$24900\nDescription: 6.1 inch flagship phone\nSpecs:\n- ram: 8GB\n"
        );
    }

    #[tokio::test]
    async fn listing_returns_whole_category() {
        let tool = ProductSearchTool::new(store());
        let out = tool.invoke("list all laptops").await.expect("invoke");
        assert!(out.contains("Product name: LaptopY"));
        assert!(!out.contains("PhoneX"));
    }

    #[tokio::test]
    async fn no_match_is_a_sentence() {
        let tool = ProductSearchTool::new(store());
        assert_eq!(tool.invoke("tablet").await.expect("invoke"), NOT_FOUND);
    }
}
