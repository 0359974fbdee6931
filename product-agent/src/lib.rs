//! Tool-using product consultant.
//!
//! - [`tools`]: `product_search` and `product_recommendation` over a
//!   [`product_rag::ProductStore`], dispatched through [`ToolRegistry`]
//! - [`agent`]: bounded chat loop where the model picks tools via JSON
//! - [`model`]: the [`ChatModel`] seam, implemented for the Ollama profiles

pub mod agent;
pub mod config;
pub mod errors;
pub mod model;
pub mod prompt;
pub mod tools;

pub use agent::{AgentReply, ProductAgent};
pub use config::AgentConfig;
pub use errors::AgentError;
pub use model::ChatModel;
pub use tools::registry::ToolRegistry;
pub use tools::{TOOL_UNAVAILABLE, Tool};

#[cfg(test)]
mod test_support {
    use std::sync::Arc;

    use product_rag::{
        Catalog, HashEmbedder, InMemoryVectorIndex, ProductRecord, ProductStore, RagConfig,
        SpecMap, SpecValue,
    };

    fn product(id: &str, name: &str, category: &str, price: f64, description: &str) -> ProductRecord {
        ProductRecord {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            stock: 3,
            description: description.into(),
            warranty: "1 year".into(),
            specs: SpecMap::new(),
        }
    }

    pub(crate) fn store() -> Arc<ProductStore> {
        let mut phone = product("p1", "PhoneX", "phone", 24900.0, "6.1 inch flagship phone");
        phone.specs.insert("ram".into(), SpecValue::Text("8GB".into()));
        let mut laptop = product("p2", "LaptopY", "laptop", 45900.0, "14 inch ultralight laptop");
        laptop.specs.insert("ram".into(), SpecValue::Text("16GB".into()));

        let catalog = match Catalog::from_records(vec![phone, laptop]) {
            Ok(c) => c,
            Err(e) => panic!("fixture catalog is invalid: {e}"),
        };
        let index = Arc::new(InMemoryVectorIndex::new(Arc::new(HashEmbedder::new(64)), 1));
        Arc::new(ProductStore::new(RagConfig::default(), catalog, index))
    }
}
