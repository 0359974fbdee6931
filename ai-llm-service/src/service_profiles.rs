//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+timeout).
//! - The embedding profile is optional: deployments using the offline hash
//!   embedder never talk to an embedding model.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//! use ai_llm_service::config::default_config::config_ollama_chat;
//! use ai_llm_service::services::ollama_service::ChatMessage;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(config_ollama_chat()?, None, Some(10))?);
//! let txt = svc.chat(&[ChatMessage::user("Hello")]).await?;
//! println!("{txt}");
//! # Ok(()) }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::ollama_service::{ChatMessage, OllamaService},
};

/// Shared service that manages the **chat** and **embedding** profiles.
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    embedding: Option<LlmModelConfig>,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,

    health: HealthService,
}

impl std::fmt::Debug for LlmServiceProfiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmServiceProfiles")
            .field("chat", &self.chat)
            .field("embedding", &self.embedding)
            .finish_non_exhaustive()
    }
}

impl LlmServiceProfiles {
    /// Creates a new service.
    ///
    /// - `chat`: required chat profile.
    /// - `embedding`: optional embedding profile.
    /// - `health_timeout_secs`: optional timeout for the health checker.
    pub fn new(
        chat: LlmModelConfig,
        embedding: Option<LlmModelConfig>,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Runs a chat completion with the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the request fails.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AiLlmError> {
        match self.chat.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.chat).await?;
                Ok(cli.chat(messages).await?)
            }
        }
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError::MissingProfile`] when no embedding profile was
    /// configured, or the provider error.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let cfg = self
            .embedding
            .as_ref()
            .ok_or(AiLlmError::MissingProfile("embedding"))?;
        match cfg.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(cfg).await?;
                Ok(cli.embeddings(input).await?)
            }
        }
    }

    /// Returns a health snapshot for all distinct profiles.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = Vec::<LlmModelConfig>::with_capacity(2);
        list.push(self.chat.clone());
        if let Some(emb) = &self.embedding {
            if *emb != self.chat {
                list.push(emb.clone());
            }
        }
        self.health.check_many(&list).await
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, Option<&LlmModelConfig>) {
        (&self.chat, self.embedding.as_ref())
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, Arc::clone(&cli));
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}
