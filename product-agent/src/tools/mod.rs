//! Tools the agent can call, plus shared text formatting.

use futures::future::BoxFuture;
use product_rag::ProductRecord;

use crate::errors::AgentError;

pub mod recommend;
pub mod registry;
pub mod search;

/// Sentence returned to the model when a tool fails.
pub const TOOL_UNAVAILABLE: &str =
    "Product lookup is temporarily unavailable, please try again later.";

/// A named capability invoked with a single free-text argument.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line description shown to the model.
    fn description(&self) -> &'static str;

    fn invoke<'a>(&'a self, argument: &'a str) -> BoxFuture<'a, Result<String, AgentError>>;
}

/// Name, category, price and description lines for one product.
pub(crate) fn format_summary(record: &ProductRecord) -> String {
    format!(
        "Product name: {}\nCategory: {}\nPrice: NT${}\nDescription: {}\n",
        record.name,
        record.category,
        record.price_display(),
        record.description
    )
}

/// Summary followed by one `- key: value` line per spec.
pub(crate) fn format_with_specs(record: &ProductRecord) -> String {
    let mut s = format_summary(record);
    s.push_str("Specs:\n");
    for (key, value) in &record.specs {
        s.push_str(&format!("- {key}: {value}\n"));
    }
    s
}
