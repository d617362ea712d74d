//! Push subscriber - the client side of the live channel
//!
//! Opens one WebSocket connection, sends the authenticate frame, and
//! pumps incoming pushes into a shared [`InboxState`]. A connection
//! that cannot be opened is an error the caller handles by falling
//! back to HTTP polling; nothing here hard-fails the application.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use eventlink_core::Snowflake;

use crate::protocol::{ClientFrame, PushMessage};

use super::state::InboxState;

/// Subscriber errors
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("failed to connect: {0}")]
    Connect(String),

    #[error("failed to send authenticate frame: {0}")]
    Authenticate(String),
}

/// A live subscription for one tab.
///
/// Dropping the subscriber (or calling [`PushSubscriber::shutdown`])
/// closes the connection and stops dispatch.
pub struct PushSubscriber {
    user_id: Snowflake,
    state: Arc<Mutex<InboxState>>,
    reader: JoinHandle<()>,
}

impl PushSubscriber {
    /// Connect to `url` (e.g. `ws://host:port/ws`), authenticate as
    /// `user_id`, and start dispatching into `state`.
    ///
    /// # Errors
    /// Returns an error when the connection cannot be opened or the
    /// authenticate frame cannot be sent. Callers degrade to HTTP
    /// polling in that case.
    pub async fn connect(
        url: &str,
        user_id: Snowflake,
        state: Arc<Mutex<InboxState>>,
    ) -> Result<Self, SubscriberError> {
        let (socket, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| SubscriberError::Connect(e.to_string()))?;

        let (mut sink, mut stream) = socket.split();

        let auth = ClientFrame::Authenticate { user_id };
        let frame = serde_json::to_string(&auth)
            .map_err(|e| SubscriberError::Authenticate(e.to_string()))?;
        sink.send(Message::Text(frame))
            .await
            .map_err(|e| SubscriberError::Authenticate(e.to_string()))?;

        tracing::debug!(user_id = %user_id, url, "Push subscriber connected");

        let dispatch_state = state.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => match PushMessage::from_json(&text) {
                        Ok(message) => {
                            dispatch_state.lock().apply(user_id, &message);
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "Ignoring unparseable push frame");
                        }
                    },
                    Ok(Message::Close(_)) => {
                        tracing::debug!(user_id = %user_id, "Push connection closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(user_id = %user_id, error = %e, "Push connection error");
                        break;
                    }
                }
            }
            // No resumption of missed messages: the next HTTP fetch
            // resynchronizes after a gap.
        });

        Ok(Self {
            user_id,
            state,
            reader,
        })
    }

    /// The user this subscription authenticated as
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Shared tab state driven by this subscription
    pub fn state(&self) -> &Arc<Mutex<InboxState>> {
        &self.state
    }

    /// Stop dispatching and drop the connection
    pub fn shutdown(self) {
        self.reader.abort();
        tracing::debug!(user_id = %self.user_id, "Push subscriber shut down");
    }
}

impl Drop for PushSubscriber {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

impl std::fmt::Debug for PushSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushSubscriber")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
