//! Bounded tool-using agent loop.

use std::sync::Arc;

use ai_llm_service::services::ollama_service::ChatMessage;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::errors::AgentError;
use crate::model::ChatModel;
use crate::prompt::{Action, build_observation, build_system_prompt, parse_action};
use crate::tools::registry::ToolRegistry;

/// Outcome of one agent run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReply {
    /// `"success"` or `"error"`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub agent_name: String,
}

impl AgentReply {
    /// Text to show the customer: the response, or the error message.
    pub fn text(&self) -> &str {
        self.response
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Product consultant driving [`ToolRegistry`] through a [`ChatModel`].
pub struct ProductAgent {
    cfg: AgentConfig,
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
}

impl ProductAgent {
    pub fn new(cfg: AgentConfig, model: Arc<dyn ChatModel>, tools: ToolRegistry) -> Self {
        Self { cfg, model, tools }
    }

    pub fn name(&self) -> &str {
        &self.cfg.name
    }

    /// Answers one customer message. Never fails: errors are reported in
    /// the reply with `status = "error"`.
    pub async fn run(&self, input: &str) -> AgentReply {
        match self.respond(input).await {
            Ok(text) => AgentReply {
                status: "success",
                response: Some(text),
                error: None,
                agent_name: self.cfg.name.clone(),
            },
            Err(err) => {
                warn!(target: "product_agent", agent = %self.cfg.name, error = %err, "agent run failed");
                AgentReply {
                    status: "error",
                    response: None,
                    error: Some(err.to_string()),
                    agent_name: self.cfg.name.clone(),
                }
            }
        }
    }

    async fn respond(&self, input: &str) -> Result<String, AgentError> {
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.cfg.name, &self.tools.describe())),
            ChatMessage::user(input),
        ];
        let mut last_output: Option<String> = None;

        for step in 1..=self.cfg.max_steps {
            let reply = self.model.complete(&messages).await?;
            match parse_action(&reply) {
                Action::Answer(text) if !text.trim().is_empty() => {
                    info!(target: "product_agent", step, "agent answered");
                    return Ok(text);
                }
                Action::Answer(_) => {
                    return last_output.ok_or(AgentError::NoAnswer);
                }
                Action::CallTool { tool, input } => {
                    info!(target: "product_agent", step, tool = %tool, "agent calls tool");
                    let output = self.tools.invoke(&tool, &input).await;
                    messages.push(ChatMessage::assistant(reply));
                    messages.push(ChatMessage::user(build_observation(&tool, &output)));
                    last_output = Some(output);
                }
            }
        }

        warn!(target: "product_agent", max_steps = self.cfg.max_steps, "step limit reached");
        last_output.ok_or(AgentError::NoAnswer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::future::BoxFuture;

    use super::*;
    use crate::test_support::store;

    /// Replays canned replies in order and records every transcript.
    struct ScriptedModel {
        replies: Mutex<Vec<Result<String, AgentError>>>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, AgentError>>) -> Arc<Self> {
            let mut replies = replies;
            replies.reverse();
            Arc::new(Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().map(|s| s.len()).unwrap_or_default()
        }
    }

    impl ChatModel for ScriptedModel {
        fn complete<'a>(
            &'a self,
            messages: &'a [ChatMessage],
        ) -> BoxFuture<'a, Result<String, AgentError>> {
            Box::pin(async move {
                if let Ok(mut seen) = self.seen.lock() {
                    seen.push(messages.to_vec());
                }
                self.replies
                    .lock()
                    .ok()
                    .and_then(|mut r| r.pop())
                    .unwrap_or_else(|| Ok("{\"answer\": \"done\"}".into()))
            })
        }
    }

    fn agent(model: Arc<ScriptedModel>, max_steps: usize) -> ProductAgent {
        let cfg = AgentConfig {
            max_steps,
            ..AgentConfig::default()
        };
        ProductAgent::new(cfg, model, ToolRegistry::with_product_tools(store()))
    }

    #[tokio::test]
    async fn tool_output_feeds_the_final_answer() {
        let model = ScriptedModel::new(vec![
            Ok(r#"{"tool": "product_search", "input": "PhoneX"}"#.into()),
            Ok(r#"{"answer": "PhoneX costs NT$24900."}"#.into()),
        ]);
        let reply = agent(model.clone(), 4).run("How much is PhoneX?").await;

        assert_eq!(reply.status, "success");
        assert_eq!(reply.text(), "PhoneX costs NT$24900.");
        assert_eq!(reply.agent_name, "ProductConsultant");

        let seen = model.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen.len(), 2);
        let observation = &seen[1].last().map(|m| m.content.clone()).unwrap_or_default();
        assert!(observation.starts_with("Tool `product_search` returned:"));
        assert!(observation.contains("Price: NT$24900"));
    }

    #[tokio::test]
    async fn plain_text_reply_is_the_answer() {
        let model = ScriptedModel::new(vec![Ok("Hello! Ask me about any product.".into())]);
        let reply = agent(model, 4).run("hi").await;
        assert_eq!(reply.response.as_deref(), Some("Hello! Ask me about any product."));
    }

    #[tokio::test]
    async fn step_limit_returns_last_tool_output() {
        let call = || Ok(r#"{"tool": "product_recommendation", "input": "8GB"}"#.to_string());
        let model = ScriptedModel::new(vec![call(), call(), call()]);
        let reply = agent(model.clone(), 2).run("recommend something").await;

        assert_eq!(model.calls(), 2);
        assert!(reply.is_success());
        assert!(reply.text().starts_with("Based on your requirements"));
    }

    #[tokio::test]
    async fn model_errors_become_error_replies() {
        let model = ScriptedModel::new(vec![Err(AgentError::Config("model offline".into()))]);
        let reply = agent(model, 4).run("hi").await;

        assert_eq!(reply.status, "error");
        assert_eq!(reply.response, None);
        assert!(reply.text().contains("model offline"));
        let json = serde_json::to_value(&reply).expect("json");
        assert_eq!(json["status"], "error");
        assert!(json.get("response").is_none());
    }
}
