//! # eventlink-realtime
//!
//! In-process live push. A [`ConnectionRegistry`] tracks the open
//! WebSocket connections per user; the [`PushBroadcaster`] delivers
//! small tagged JSON payloads to whoever is connected, and silently
//! does nothing for everyone else. Delivery is strictly best-effort:
//! no buffering, no replay, no acks. Clients resynchronize over HTTP
//! after any gap.
//!
//! Known limitation: the registry is process-local. In a multi-instance
//! deployment a user's tabs may land on different instances and only
//! the instance holding a connection can push to it; the others rely
//! on the client's polling fallback.

pub mod broadcaster;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod subscriber;

pub use broadcaster::{PushBroadcaster, PushError};
pub use protocol::{ClientFrame, PushMessage};
pub use registry::{ConnectionHandle, ConnectionRegistry};
pub use server::{ws_handler, RealtimeState};
pub use subscriber::{InboxState, PushSubscriber, SubscriberError};
