//! Shared LLM plumbing for the storefront assistant.
//!
//! - [`config`]: model configs built from environment variables
//! - [`services::ollama_service`]: thin Ollama client (`/api/chat`, `/api/embeddings`)
//! - [`service_profiles`]: chat + embedding profiles behind one shared handle
//! - [`health_service`]: resilient `/api/tags` probe for `/health`
//! - [`telemetry`]: library-scoped tracing layer

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
