//! WebSocket endpoint
//!
//! One upgraded connection per browser tab. The first client frame must
//! be `{"type":"authenticate","user_id":...}`; anything else closes the
//! socket. After the handshake the server only pushes; client frames
//! are ignored apart from close.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::{ClientFrame, PushMessage};
use crate::registry::ConnectionRegistry;

/// How long the client gets to send its authenticate frame
const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 64;

/// State for the WebSocket route
#[derive(Clone)]
pub struct RealtimeState {
    registry: Arc<ConnectionRegistry>,
}

impl RealtimeState {
    /// Create state over the shared registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// The shared connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }
}

impl std::fmt::Debug for RealtimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeState")
            .field("registry", &self.registry)
            .finish()
    }
}

/// WebSocket upgrade handler for `/ws`
pub async fn ws_handler(
    State(state): State<RealtimeState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Drive one upgraded connection to completion
async fn handle_socket(state: RealtimeState, socket: axum::extract::ws::WebSocket) {
    let conn_id = Uuid::new_v4().to_string();
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Authenticate-first handshake
    let user_id = match wait_for_authenticate(&mut ws_stream).await {
        Some(user_id) => user_id,
        None => {
            tracing::debug!(conn_id = %conn_id, "Handshake failed, closing socket");
            let _ = ws_sink.close().await;
            return;
        }
    };

    let (tx, mut rx) = mpsc::channel::<PushMessage>(MESSAGE_BUFFER_SIZE);
    state.registry().register(conn_id.clone(), user_id, tx);

    tracing::info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection authenticated");

    // Forward queued pushes to the socket
    let conn_id_send = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::debug!(conn_id = %conn_id_send, "Socket send failed, ending send task");
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(conn_id = %conn_id_send, error = %e, "Failed to serialize push message");
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Drain the client side until it goes away. There is no
    // client-to-server protocol after authenticate.
    let conn_id_recv = conn_id.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::debug!(conn_id = %conn_id_recv, "Client closed connection");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                }
                Ok(_) => {
                    tracing::trace!(conn_id = %conn_id_recv, "Ignoring post-handshake client frame");
                }
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id_recv, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = send_task => {}
        _ = recv_task => {}
    }

    state.registry().deregister(&conn_id);
    tracing::info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection closed");
}

/// Await the authenticate frame, bounded by [`AUTH_TIMEOUT`].
///
/// Returns the authenticated user ID, or None when the first frame is
/// missing, malformed, or late.
async fn wait_for_authenticate(
    stream: &mut (impl StreamExt<Item = Result<Message, axum::Error>> + Unpin),
) -> Option<eventlink_core::Snowflake> {
    let frame = tokio::time::timeout(AUTH_TIMEOUT, stream.next()).await.ok()??;

    match frame {
        Ok(Message::Text(text)) => match serde_json::from_str::<ClientFrame>(&text) {
            Ok(ClientFrame::Authenticate { user_id }) => Some(user_id),
            Err(e) => {
                tracing::debug!(error = %e, "First frame was not an authenticate frame");
                None
            }
        },
        _ => None,
    }
}
