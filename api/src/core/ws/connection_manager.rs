//! Registry of live WebSocket sessions keyed by client id.

use std::collections::HashMap;

use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};

/// Outgoing text frames for one socket.
pub type ClientSender = mpsc::UnboundedSender<String>;

/// Live sessions. A reconnect with the same id replaces the old sender.
#[derive(Default)]
pub struct ConnectionManager {
    clients: RwLock<HashMap<String, ClientSender>>,
}

impl ConnectionManager {
    pub async fn connect(&self, client_id: &str, sender: ClientSender) {
        let replaced = self
            .clients
            .write()
            .await
            .insert(client_id.to_string(), sender)
            .is_some();
        info!(target: "api::ws", client_id, replaced, "client connected");
    }

    /// Removes `client_id` only while it still maps to `sender`, so a stale
    /// socket closing does not evict its replacement.
    pub async fn disconnect(&self, client_id: &str, sender: &ClientSender) {
        let mut clients = self.clients.write().await;
        if clients.get(client_id).is_some_and(|s| s.same_channel(sender)) {
            clients.remove(client_id);
            info!(target: "api::ws", client_id, "client disconnected");
        } else {
            debug!(target: "api::ws", client_id, "stale session closed");
        }
    }

    /// Queues `text` for `client_id`. Returns false when the client is gone.
    pub async fn send_to(&self, client_id: &str, text: String) -> bool {
        match self.clients.read().await.get(client_id) {
            Some(tx) => tx.send(text).is_ok(),
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_messages_to_the_current_sender() {
        let mgr = ConnectionManager::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        mgr.connect("alice", tx).await;

        assert!(mgr.send_to("alice", "hello".into()).await);
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
        assert!(!mgr.send_to("bob", "hi".into()).await);
    }

    #[tokio::test]
    async fn stale_disconnect_keeps_replacement() {
        let mgr = ConnectionManager::default();
        let (old_tx, _old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();

        mgr.connect("alice", old_tx.clone()).await;
        mgr.connect("alice", new_tx.clone()).await;
        mgr.disconnect("alice", &old_tx).await;
        assert_eq!(mgr.len().await, 1);

        assert!(mgr.send_to("alice", "still here".into()).await);
        assert_eq!(new_rx.recv().await.as_deref(), Some("still here"));

        mgr.disconnect("alice", &new_tx).await;
        assert_eq!(mgr.len().await, 0);
    }
}
