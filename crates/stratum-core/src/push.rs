//! Realtime push registry
//!
//! Tracks the active realtime connections per account and fans status
//! messages out to them. The registry is transport-neutral: a connection
//! is an unbounded channel sender, and the consuming service pumps the
//! receiving end into its websocket (or any other) transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use stratum_api::model::StatusMessage;

struct Connection {
    id: u64,
    sender: mpsc::UnboundedSender<StatusMessage>,
}

/// Registry of active realtime connections, keyed by account id.
pub struct PushManager {
    connections: Arc<DashMap<Uuid, Vec<Connection>>>,
    next_id: AtomicU64,
}

impl Default for PushManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PushManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a new connection for the account.
    ///
    /// Returns the connection id (needed to unregister) and the receiving
    /// end the caller pumps into its transport.
    pub fn register(&self, account_id: Uuid) -> (u64, mpsc::UnboundedReceiver<StatusMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections
            .entry(account_id)
            .or_default()
            .push(Connection { id, sender });
        tracing::debug!(%account_id, connection = id, "realtime connection registered");
        (id, receiver)
    }

    /// Remove a connection. The account entry disappears with its last
    /// connection.
    pub fn unregister(&self, account_id: Uuid, connection_id: u64) {
        if let Some(mut entry) = self.connections.get_mut(&account_id) {
            entry.retain(|c| c.id != connection_id);
            let empty = entry.is_empty();
            drop(entry);
            if empty {
                self.connections.remove_if(&account_id, |_, v| v.is_empty());
            }
            tracing::debug!(%account_id, connection = connection_id, "realtime connection removed");
        }
    }

    /// Send a status message to all of the account's connections.
    ///
    /// Connections whose receiving end is gone are pruned.
    pub fn send(&self, account_id: Uuid, message: &StatusMessage) {
        if let Some(mut entry) = self.connections.get_mut(&account_id) {
            entry.retain(|c| c.sender.send(message.clone()).is_ok());
            let empty = entry.is_empty();
            drop(entry);
            if empty {
                self.connections.remove_if(&account_id, |_, v| v.is_empty());
            }
        }
    }

    /// Send a status message to every connected account.
    pub fn broadcast(&self, message: &StatusMessage) {
        let accounts: Vec<Uuid> = self.connections.iter().map(|e| *e.key()).collect();
        for account_id in accounts {
            self.send(account_id, message);
        }
    }

    /// Number of active connections across all accounts.
    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(|e| e.value().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_send() {
        let manager = PushManager::new();
        let account = Uuid::new_v4();
        let (_, mut receiver) = manager.register(account);

        manager.send(account, &StatusMessage::success("saved"));
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.message, "saved");
    }

    #[tokio::test]
    async fn test_send_to_unknown_account_is_noop() {
        let manager = PushManager::new();
        manager.send(Uuid::new_v4(), &StatusMessage::success("nobody listens"));
        assert_eq!(manager.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_unregister_removes_empty_entry() {
        let manager = PushManager::new();
        let account = Uuid::new_v4();
        let (id, _receiver) = manager.register(account);
        assert_eq!(manager.connection_count(), 1);

        manager.unregister(account, id);
        assert_eq!(manager.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_dead_connections_are_pruned() {
        let manager = PushManager::new();
        let account = Uuid::new_v4();
        let (_, receiver) = manager.register(account);
        drop(receiver);

        manager.send(account, &StatusMessage::success("anyone"));
        assert_eq!(manager.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_accounts() {
        let manager = PushManager::new();
        let (_, mut first) = manager.register(Uuid::new_v4());
        let (_, mut second) = manager.register(Uuid::new_v4());

        manager.broadcast(&StatusMessage::new(
            200,
            stratum_api::model::AlertSeverity::Warning,
            "maintenance in 5 minutes",
        ));

        assert_eq!(first.recv().await.unwrap().message, "maintenance in 5 minutes");
        assert_eq!(second.recv().await.unwrap().message, "maintenance in 5 minutes");
    }

    #[tokio::test]
    async fn test_multiple_connections_per_account() {
        let manager = PushManager::new();
        let account = Uuid::new_v4();
        let (_, mut a) = manager.register(account);
        let (_, mut b) = manager.register(account);
        assert_eq!(manager.connection_count(), 2);

        manager.send(account, &StatusMessage::success("both"));
        assert_eq!(a.recv().await.unwrap().message, "both");
        assert_eq!(b.recv().await.unwrap().message, "both");
    }
}
