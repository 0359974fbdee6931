use serde::{Deserialize, Serialize};

/// Frame sent by the browser.
#[derive(Debug, Deserialize)]
pub struct ClientFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

/// Frame sent back to the browser.
#[derive(Debug, PartialEq, Serialize)]
pub struct ServerFrame {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
    pub status: &'static str,
}

impl ServerFrame {
    pub fn response(content: impl Into<String>, status: &'static str) -> Self {
        Self {
            kind: "response",
            content: content.into(),
            status,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: "error",
            content: content.into(),
            status: "error",
        }
    }
}
