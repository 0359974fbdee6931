//! Default model configs loaded from environment variables.
//!
//! Two roles are used by the assistant:
//!
//! - **Chat**      → conversational model driving the tool-using agent
//! - **Embedding** → embedding generator for the product vector index
//!
//! # Environment variables
//!
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = chat model (default `mistral`)
//! - `TEMPERATURE`                 = chat temperature (default `0.7`, range `0.0..=2.0`)
//! - `LLM_MAX_TOKENS`              = optional max tokens (u32)
//! - `EMBEDDING_MODEL`             = embedding model (mandatory for the embedding role)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_f32, env_opt_u32, env_or, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
/// - [`ConfigError::InvalidFormat`] if `OLLAMA_URL` has no http/https scheme
pub fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        let url = url.trim();
        if !url.is_empty() {
            validate_http_endpoint("OLLAMA_URL", url)?;
            return Ok(url.to_string());
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

/// Constructs a config for the **chat** model driving the agent.
///
/// # Defaults
/// - `model = "mistral"`
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(120)`
pub fn config_ollama_chat() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = env_or("OLLAMA_MODEL", "mistral");
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let temperature = env_opt_f32("TEMPERATURE")?.unwrap_or(0.7);
    validate_range_f32("TEMPERATURE", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        max_tokens,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs a config for the **embedding** model.
///
/// # Env
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
