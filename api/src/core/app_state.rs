use std::path::PathBuf;
use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use ai_llm_service::config::default_config::{config_ollama_chat, config_ollama_embedding};
use ai_llm_service::error_handler::env_or;
use product_agent::{AgentConfig, ProductAgent, ToolRegistry};
use product_rag::{
    EmbeddingBackend, EmbeddingsProvider, HashEmbedder, InMemoryVectorIndex, OllamaEmbedder,
    ProductStore, RagConfig,
};
use tracing::info;

use crate::core::ws::connection_manager::ConnectionManager;
use crate::error_handler::AppError;

/// Server settings.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Listen address, e.g. `0.0.0.0:8000`.
    pub address: String,
    /// Directory mounted at `/static`.
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            address: env_or("API_ADDRESS", "0.0.0.0:8000"),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "static")),
        }
    }
}

/// Shared state for all HTTP and WebSocket handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<ProductStore>,
    pub agent: Arc<ProductAgent>,
    pub llm: Arc<LlmServiceProfiles>,
    pub connections: ConnectionManager,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<ProductStore>,
        agent: Arc<ProductAgent>,
        llm: Arc<LlmServiceProfiles>,
    ) -> Self {
        Self {
            config,
            store,
            agent,
            llm,
            connections: ConnectionManager::default(),
        }
    }

    /// Wires config, LLM profiles, catalog index and agent from environment.
    ///
    /// # Errors
    /// Configuration problems and catalog load failures abort startup.
    pub async fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let rag_cfg = RagConfig::from_env()?;

        let embedding_cfg = match rag_cfg.embedding_backend {
            EmbeddingBackend::Ollama => Some(config_ollama_embedding()?),
            EmbeddingBackend::Hash => None,
        };
        let llm = Arc::new(LlmServiceProfiles::new(config_ollama_chat()?, embedding_cfg, Some(5))?);

        let embedder: Arc<dyn EmbeddingsProvider> = match rag_cfg.embedding_backend {
            EmbeddingBackend::Hash => Arc::new(HashEmbedder::new(rag_cfg.embedding_dim)),
            EmbeddingBackend::Ollama => {
                Arc::new(OllamaEmbedder::new(Arc::clone(&llm), rag_cfg.embedding_dim)?)
            }
        };
        info!(
            target: "api",
            backend = ?rag_cfg.embedding_backend,
            dim = rag_cfg.embedding_dim,
            catalog = %rag_cfg.catalog_path.display(),
            "initializing product store"
        );

        let index = Arc::new(InMemoryVectorIndex::new(embedder, rag_cfg.embedding_concurrency));
        let store = Arc::new(ProductStore::open(rag_cfg, index).await?);

        let tools = ToolRegistry::with_product_tools(Arc::clone(&store));
        let agent = Arc::new(ProductAgent::new(AgentConfig::from_env()?, llm.clone(), tools));

        Ok(Self::new(config, store, agent, llm))
    }
}
