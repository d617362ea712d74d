//! Client-side subscriber
//!
//! One subscriber per "tab": a connection, a dispatch table keyed by
//! message type, a local badge-count cache, and the tab-title side
//! effect. Everything degrades to HTTP polling when the connection
//! cannot be opened.

mod client;
mod state;

pub use client::{PushSubscriber, SubscriberError};
pub use state::{InboxState, Popup};
