//! Name-keyed tool dispatch.

use std::sync::Arc;

use product_rag::ProductStore;
use tracing::{info, warn};

use super::recommend::ProductRecommendationTool;
use super::search::ProductSearchTool;
use super::{TOOL_UNAVAILABLE, Tool};

/// Ordered set of tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// `product_search` and `product_recommendation` over one store.
    pub fn with_product_tools(store: Arc<ProductStore>) -> Self {
        let mut reg = Self::default();
        reg.register(Arc::new(ProductSearchTool::new(Arc::clone(&store))));
        reg.register(Arc::new(ProductRecommendationTool::new(store)));
        reg
    }

    /// Adds a tool; a tool with the same name is replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// `- name: description` lines for the system prompt.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Runs `tool_name` with `argument`. Always returns readable text:
    /// unknown tools and tool failures become sentences.
    pub async fn invoke(&self, tool_name: &str, argument: &str) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == tool_name) else {
            warn!(target: "product_agent::tools", tool = tool_name, "unknown tool");
            return format!(
                "Unknown tool `{tool_name}`. Available tools: {}.",
                self.names().join(", ")
            );
        };

        info!(target: "product_agent::tools", tool = tool_name, argument, "tool call");
        match tool.invoke(argument).await {
            Ok(text) => text,
            Err(err) => {
                warn!(target: "product_agent::tools", tool = tool_name, error = %err, "tool failed");
                TOOL_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;

    use super::*;
    use crate::errors::AgentError;
    use crate::test_support::store;

    struct Broken;

    impl Tool for Broken {
        fn name(&self) -> &'static str {
            "product_search"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn invoke<'a>(&'a self, _argument: &'a str) -> BoxFuture<'a, Result<String, AgentError>> {
            Box::pin(async {
                Err(AgentError::Tool {
                    tool: "product_search".into(),
                    reason: "index offline".into(),
                })
            })
        }
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let reg = ToolRegistry::with_product_tools(store());
        assert_eq!(reg.names(), ["product_search", "product_recommendation"]);
        let out = reg.invoke("product_search", "LaptopY").await;
        assert!(out.contains("Product name: LaptopY"));
    }

    #[tokio::test]
    async fn unknown_tool_lists_available_ones() {
        let reg = ToolRegistry::with_product_tools(store());
        let out = reg.invoke("order_lookup", "42").await;
        assert_eq!(
            out,
            "Unknown tool `order_lookup`. Available tools: product_search, product_recommendation."
        );
    }

    #[tokio::test]
    async fn failures_do_not_leak_internals() {
        let mut reg = ToolRegistry::with_product_tools(store());
        reg.register(Arc::new(Broken));
        let out = reg.invoke("product_search", "anything").await;
        assert_eq!(out, TOOL_UNAVAILABLE);
        assert!(!out.contains("index offline"));
    }
}
