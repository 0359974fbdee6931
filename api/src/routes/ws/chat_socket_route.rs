use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use product_agent::ProductAgent;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    core::{app_state::AppState, ws::connection_manager::ClientSender},
    routes::ws::chat_message::{ClientFrame, ServerFrame},
};

pub async fn chat_socket_route(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, client_id, state))
}

async fn run_session(socket: WebSocket, client_id: String, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    state.connections.connect(&client_id, tx.clone()).await;

    while let Some(msg) = stream.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(err) => {
                warn!(target: "api::ws", client_id = %client_id, error = %err, "socket read failed");
                break;
            }
        };
        let Some(frame) = handle_client_text(&state.agent, text.as_str()).await else {
            continue;
        };
        if !deliver(&tx, &frame) {
            debug!(target: "api::ws", client_id = %client_id, "reply dropped");
        }
    }

    state.connections.disconnect(&client_id, &tx).await;
    drop(tx);
    if let Err(err) = writer.await {
        warn!(target: "api::ws", client_id = %client_id, error = %err, "writer task failed");
    }
    info!(target: "api::ws", client_id = %client_id, "session closed");
}

/// Queues `frame` on this session's own sender. A reconnect under the same
/// client id never receives replies meant for the previous socket.
fn deliver(tx: &ClientSender, frame: &ServerFrame) -> bool {
    match serde_json::to_string(frame) {
        Ok(json) => tx.send(json).is_ok(),
        Err(err) => {
            error!(target: "api::ws", error = %err, "frame serialization failed");
            false
        }
    }
}

/// Maps one inbound text frame to the reply, if any.
///
/// Malformed JSON yields an error frame; frame types other than `chat` are
/// ignored.
pub async fn handle_client_text(agent: &ProductAgent, text: &str) -> Option<ServerFrame> {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(f) => f,
        Err(err) => {
            debug!(target: "api::ws", error = %err, "malformed client frame");
            return Some(ServerFrame::error("Invalid message format"));
        }
    };
    if frame.kind != "chat" {
        debug!(target: "api::ws", kind = %frame.kind, "ignored frame");
        return None;
    }

    info!(target: "api::ws", len = frame.content.len(), "chat message");
    let reply = agent.run(&frame.content).await;
    Some(ServerFrame::response(reply.text(), reply.status))
}

#[cfg(test)]
mod tests {
    use ai_llm_service::services::ollama_service::ChatMessage;
    use futures::future::BoxFuture;
    use product_agent::{AgentConfig, AgentError, ChatModel, ToolRegistry};
    use product_rag::{
        Catalog, HashEmbedder, InMemoryVectorIndex, ProductRecord, ProductStore, RagConfig, SpecMap,
    };

    use super::*;

    struct Echo;

    impl ChatModel for Echo {
        fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> BoxFuture<'a, Result<String, AgentError>> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Box::pin(async move { Ok(format!("echo: {last}")) })
        }
    }

    struct Down;

    impl ChatModel for Down {
        fn complete<'a>(&'a self, _messages: &'a [ChatMessage]) -> BoxFuture<'a, Result<String, AgentError>> {
            Box::pin(async { Err(AgentError::NoAnswer) })
        }
    }

    fn agent(model: Arc<dyn ChatModel>) -> ProductAgent {
        let record = ProductRecord {
            id: "p1".into(),
            name: "PhoneX".into(),
            category: "phone".into(),
            price: 100.0,
            stock: 1,
            description: String::new(),
            warranty: String::new(),
            specs: SpecMap::new(),
        };
        let catalog = Catalog::from_records(vec![record]).expect("catalog");
        let index = Arc::new(InMemoryVectorIndex::new(Arc::new(HashEmbedder::new(32)), 1));
        let store = Arc::new(ProductStore::new(RagConfig::default(), catalog, index));
        ProductAgent::new(AgentConfig::default(), model, ToolRegistry::with_product_tools(store))
    }

    #[tokio::test]
    async fn malformed_json_gets_an_error_frame() {
        let frame = handle_client_text(&agent(Arc::new(Echo)), "not json").await;
        assert_eq!(frame, Some(ServerFrame::error("Invalid message format")));
    }

    #[tokio::test]
    async fn unknown_frame_types_are_ignored() {
        let frame = handle_client_text(&agent(Arc::new(Echo)), r#"{"type":"ping"}"#).await;
        assert_eq!(frame, None);
    }

    #[tokio::test]
    async fn chat_frames_are_answered_by_the_agent() {
        let frame = handle_client_text(
            &agent(Arc::new(Echo)),
            r#"{"type":"chat","content":"hello"}"#,
        )
        .await
        .expect("reply");
        assert_eq!(frame.kind, "response");
        assert_eq!(frame.status, "success");
        assert_eq!(frame.content, "echo: hello");
    }

    #[tokio::test]
    async fn agent_failures_are_reported_with_error_status() {
        let frame = handle_client_text(
            &agent(Arc::new(Down)),
            r#"{"type":"chat","content":"hello"}"#,
        )
        .await
        .expect("reply");
        assert_eq!(frame.kind, "response");
        assert_eq!(frame.status, "error");
        assert!(!frame.content.is_empty());
    }

    #[tokio::test]
    async fn replies_stay_on_the_socket_that_asked_after_a_reconnect() {
        let connections = crate::core::ws::connection_manager::ConnectionManager::default();
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();
        connections.connect("alice", old_tx.clone()).await;
        connections.connect("alice", new_tx).await;

        assert!(deliver(&old_tx, &ServerFrame::response("for the old tab", "success")));

        let got = old_rx.recv().await.expect("old socket reply");
        assert!(got.contains("for the old tab"));
        assert!(new_rx.try_recv().is_err());
    }

    #[test]
    fn server_frames_serialize_with_type_key() {
        let json = serde_json::to_value(ServerFrame::response("hi", "success")).expect("json");
        assert_eq!(json, serde_json::json!({"type":"response","content":"hi","status":"success"}));
    }
}
