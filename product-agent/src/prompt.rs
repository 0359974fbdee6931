//! Prompt builders for the consultant agent.
//!
//! The model answers with exactly one JSON object per turn, either a tool
//! call or a final answer.

use serde::Deserialize;

/// System prompt listing the available tools.
pub fn build_system_prompt(agent_name: &str, tools: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "You are {agent_name}, a professional consumer electronics consultant for an online store.\n"
    ));
    s.push_str("Answer customer questions about products using the tools below, not your own knowledge.\n");
    s.push_str("\n# Tools\n");
    s.push_str(tools);
    s.push_str("\n\n# Protocol\n");
    s.push_str("Reply with exactly one JSON object and nothing else:\n");
    s.push_str("- To call a tool: {\"tool\": \"<tool name>\", \"input\": \"<text argument>\"}\n");
    s.push_str("- To answer the customer: {\"answer\": \"<your reply>\"}\n");
    s.push_str("\n# Instructions\n");
    s.push_str("- Use product_search for questions about specific products, categories or specs.\n");
    s.push_str("- Use product_recommendation when the customer describes needs.\n");
    s.push_str("- Never write code. Be friendly and accurate; say so when you are unsure.\n");
    s.push_str("- If a tool finds nothing, offer general advice instead.\n");
    s
}

/// Follow-up user turn carrying a tool result.
pub fn build_observation(tool: &str, output: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!("Tool `{tool}` returned:\n"));
    s.push_str(output);
    s.push_str("\n\nReply with the final answer, or call another tool.");
    s
}

/// Parsed model turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CallTool { tool: String, input: String },
    Answer(String),
}

#[derive(Deserialize)]
struct RawAction {
    tool: Option<String>,
    input: Option<serde_json::Value>,
    answer: Option<String>,
}

/// Parses a model reply. Code fences and surrounding prose are tolerated;
/// anything that is not a recognizable JSON action is the final answer.
pub fn parse_action(reply: &str) -> Action {
    let trimmed = reply.trim();
    let json = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => return Action::Answer(trimmed.to_string()),
    };

    match serde_json::from_str::<RawAction>(json) {
        Ok(RawAction {
            tool: Some(tool),
            input,
            ..
        }) if !tool.trim().is_empty() => {
            let input = match input {
                Some(serde_json::Value::String(s)) => s,
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Action::CallTool {
                tool: tool.trim().to_string(),
                input,
            }
        }
        Ok(RawAction {
            answer: Some(answer),
            ..
        }) => Action::Answer(answer),
        _ => Action::Answer(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_calls_inside_fences() {
        let reply = "```json\n{\"tool\": \"product_search\", \"input\": \"PhoneX\"}\n```";
        assert_eq!(
            parse_action(reply),
            Action::CallTool {
                tool: "product_search".into(),
                input: "PhoneX".into()
            }
        );
    }

    #[test]
    fn parses_answers() {
        assert_eq!(
            parse_action(r#"{"answer": "PhoneX has 5 units left."}"#),
            Action::Answer("PhoneX has 5 units left.".into())
        );
    }

    #[test]
    fn plain_text_is_an_answer() {
        assert_eq!(
            parse_action("  Hello! How can I help?  "),
            Action::Answer("Hello! How can I help?".into())
        );
    }

    #[test]
    fn unknown_json_shape_is_returned_verbatim() {
        let reply = r#"{"thought": "hmm"}"#;
        assert_eq!(parse_action(reply), Action::Answer(reply.into()));
    }

    #[test]
    fn non_string_input_is_stringified() {
        assert_eq!(
            parse_action(r#"{"tool":"product_search","input":{"q":"x"}}"#),
            Action::CallTool {
                tool: "product_search".into(),
                input: r#"{"q":"x"}"#.into()
            }
        );
    }

    #[test]
    fn system_prompt_lists_tools() {
        let p = build_system_prompt("ProductConsultant", "- product_search: find");
        assert!(p.contains("You are ProductConsultant"));
        assert!(p.contains("- product_search: find"));
    }
}
