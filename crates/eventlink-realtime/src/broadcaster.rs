//! Push broadcaster
//!
//! Best-effort, at-most-once fan-out over the connection registry.
//! A user with no open connection is a silent no-op. Send failures are
//! logged and surfaced to the caller, but no caller may let them fail
//! an HTTP request: the primary write is already committed and the
//! badge-count fetch path is the guaranteed fallback.

use std::sync::Arc;

use eventlink_core::Snowflake;

use crate::protocol::PushMessage;
use crate::registry::ConnectionRegistry;

/// Push delivery errors
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("all {attempted} push sends to user {user_id} failed")]
    AllSendsFailed { user_id: Snowflake, attempted: usize },
}

/// Broadcaster over an injected connection registry.
///
/// Constructed once at process start and passed (via the service
/// context) to every handler that needs to push.
#[derive(Clone)]
pub struct PushBroadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl PushBroadcaster {
    /// Create a broadcaster over the given registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this broadcaster delivers through
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Deliver a payload to every open connection of a user.
    ///
    /// Returns the number of connections the payload reached. No open
    /// connection is not an error: `Ok(0)`. An error is returned only
    /// when at least one connection existed and none could be reached.
    pub async fn broadcast_to_user(
        &self,
        user_id: Snowflake,
        message: &PushMessage,
    ) -> Result<usize, PushError> {
        let connections = self.registry.connections_for(user_id);
        if connections.is_empty() {
            tracing::trace!(user_id = %user_id, kind = message.kind(), "No open connection, push skipped");
            return Ok(0);
        }

        let attempted = connections.len();
        let mut sent = 0;

        for conn in connections {
            match conn.send(message.clone()).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        conn_id = conn.conn_id(),
                        kind = message.kind(),
                        error = %e,
                        "Push send failed"
                    );
                }
            }
        }

        tracing::trace!(
            user_id = %user_id,
            kind = message.kind(),
            sent,
            attempted,
            "Push delivered"
        );

        if sent == 0 {
            return Err(PushError::AllSendsFailed { user_id, attempted });
        }

        Ok(sent)
    }

    /// Fire-and-forget variant: logs any failure and discards it.
    ///
    /// This is what the write paths call after committing their primary
    /// mutation.
    pub async fn notify(&self, user_id: Snowflake, message: &PushMessage) {
        if let Err(e) = self.broadcast_to_user(user_id, message).await {
            tracing::warn!(user_id = %user_id, error = %e, "Best-effort push dropped");
        }
    }
}

impl std::fmt::Debug for PushBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushBroadcaster")
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlink_core::BadgeCounts;
    use tokio::sync::mpsc;

    fn counts_message() -> PushMessage {
        PushMessage::BadgeCountsUpdate {
            counts: BadgeCounts::empty(),
        }
    }

    #[tokio::test]
    async fn test_no_connection_is_silent_noop() {
        let broadcaster = PushBroadcaster::new(ConnectionRegistry::new_shared());
        let delivered = broadcaster
            .broadcast_to_user(Snowflake::new(1), &counts_message())
            .await
            .unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_delivers_to_every_tab() {
        let registry = ConnectionRegistry::new_shared();
        let broadcaster = PushBroadcaster::new(registry.clone());
        let user = Snowflake::new(1);

        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        registry.register("tab-1".to_string(), user, tx1);
        registry.register("tab-2".to_string(), user, tx2);

        let delivered = broadcaster
            .broadcast_to_user(user, &counts_message())
            .await
            .unwrap();
        assert_eq!(delivered, 2);
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_does_not_cross_users() {
        let registry = ConnectionRegistry::new_shared();
        let broadcaster = PushBroadcaster::new(registry.clone());

        let (tx, mut rx) = mpsc::channel(8);
        registry.register("other".to_string(), Snowflake::new(2), tx);

        broadcaster
            .broadcast_to_user(Snowflake::new(1), &counts_message())
            .await
            .unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_all_sends_failed_is_an_error() {
        let registry = ConnectionRegistry::new_shared();
        let broadcaster = PushBroadcaster::new(registry.clone());
        let user = Snowflake::new(1);

        let (tx, rx) = mpsc::channel(8);
        registry.register("dead".to_string(), user, tx);
        drop(rx);

        let result = broadcaster.broadcast_to_user(user, &counts_message()).await;
        assert!(matches!(
            result,
            Err(PushError::AllSendsFailed { attempted: 1, .. })
        ));

        // notify() swallows the same failure
        broadcaster.notify(user, &counts_message()).await;
    }
}
