//! Connection registry
//!
//! Tracks every live, authenticated WebSocket connection keyed by user
//! ID using DashMap for thread-safe access. Entries exist only between
//! a successful authenticate handshake and disconnect; nothing here is
//! ever persisted, and a process restart starts from empty.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use eventlink_core::Snowflake;

use crate::protocol::PushMessage;

/// A single live connection's send handle
pub struct ConnectionHandle {
    conn_id: String,
    user_id: Snowflake,
    sender: mpsc::Sender<PushMessage>,
}

impl ConnectionHandle {
    /// The connection's unique ID
    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }

    /// The user this connection authenticated as
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Queue a message for delivery on this connection
    pub async fn send(&self, message: PushMessage) -> Result<(), mpsc::error::SendError<PushMessage>> {
        self.sender.send(message).await
    }

    /// Whether the receiving side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("conn_id", &self.conn_id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Registry of live connections, keyed by user ID.
///
/// A user may hold several entries at once (one per open tab).
pub struct ConnectionRegistry {
    /// All connections by connection ID
    connections: DashMap<String, Arc<ConnectionHandle>>,

    /// User ID to connection IDs mapping
    user_connections: DashMap<Snowflake, HashSet<String>>,
}

impl ConnectionRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
        }
    }

    /// Create a registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register an authenticated connection
    pub fn register(
        &self,
        conn_id: String,
        user_id: Snowflake,
        sender: mpsc::Sender<PushMessage>,
    ) -> Arc<ConnectionHandle> {
        let handle = Arc::new(ConnectionHandle {
            conn_id: conn_id.clone(),
            user_id,
            sender,
        });

        self.connections.insert(conn_id.clone(), handle.clone());
        self.user_connections
            .entry(user_id)
            .or_default()
            .insert(conn_id.clone());

        tracing::debug!(conn_id = %conn_id, user_id = %user_id, "Connection registered");

        handle
    }

    /// Remove a connection.
    ///
    /// Uses `alter` + `retain` for atomic modify-and-cleanup so a
    /// concurrent register cannot observe a half-removed entry.
    pub fn deregister(&self, conn_id: &str) {
        if let Some((_, handle)) = self.connections.remove(conn_id) {
            self.user_connections.alter(&handle.user_id, |_, mut conns| {
                conns.remove(conn_id);
                conns
            });
            self.user_connections.retain(|_, conns| !conns.is_empty());

            tracing::debug!(conn_id = %conn_id, user_id = %handle.user_id, "Connection deregistered");
        }
    }

    /// Get all live connections for a user
    pub fn connections_for(&self, user_id: Snowflake) -> Vec<Arc<ConnectionHandle>> {
        self.user_connections
            .get(&user_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the user has at least one open connection
    pub fn is_connected(&self, user_id: Snowflake) -> bool {
        self.user_connections
            .get(&user_id)
            .is_some_and(|conns| !conns.is_empty())
    }

    /// Total number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of distinct connected users
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }

    /// Drop connections whose receiver has gone away
    pub fn sweep_closed(&self) -> usize {
        let closed: Vec<String> = self
            .connections
            .iter()
            .filter(|entry| entry.is_closed())
            .map(|entry| entry.key().clone())
            .collect();

        let count = closed.len();
        for conn_id in closed {
            self.deregister(&conn_id);
        }

        if count > 0 {
            tracing::info!(count, "Swept closed connections");
        }

        count
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_registry() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.user_count(), 0);
        assert!(!registry.is_connected(Snowflake::new(1)));
    }

    #[tokio::test]
    async fn test_register_and_deregister() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::channel(8);
        let user = Snowflake::new(10);

        let handle = registry.register("conn-1".to_string(), user, tx);
        assert_eq!(handle.conn_id(), "conn-1");
        assert_eq!(handle.user_id(), user);
        assert!(registry.is_connected(user));
        assert_eq!(registry.connection_count(), 1);

        registry.deregister("conn-1");
        assert!(!registry.is_connected(user));
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.user_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_tabs_per_user() {
        let registry = ConnectionRegistry::new();
        let user = Snowflake::new(10);
        let (tx1, _rx1) = mpsc::channel(8);
        let (tx2, _rx2) = mpsc::channel(8);

        registry.register("tab-1".to_string(), user, tx1);
        registry.register("tab-2".to_string(), user, tx2);

        assert_eq!(registry.connections_for(user).len(), 2);
        assert_eq!(registry.user_count(), 1);

        registry.deregister("tab-1");
        assert_eq!(registry.connections_for(user).len(), 1);
        assert!(registry.is_connected(user));
    }

    #[tokio::test]
    async fn test_deregister_unknown_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.deregister("never-registered");
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_sweep_closed() {
        let registry = ConnectionRegistry::new();
        let user = Snowflake::new(10);
        let (tx, rx) = mpsc::channel(8);

        registry.register("conn-1".to_string(), user, tx);
        drop(rx);

        assert_eq!(registry.sweep_closed(), 1);
        assert!(!registry.is_connected(user));
    }
}
