//! Chat model seam used by the agent loop.

use ai_llm_service::LlmServiceProfiles;
use ai_llm_service::services::ollama_service::ChatMessage;
use futures::future::BoxFuture;

use crate::errors::AgentError;

/// Anything that turns a transcript into the next assistant message.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> BoxFuture<'a, Result<String, AgentError>>;
}

impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async move { Ok(self.chat(messages).await?) })
    }
}
