//! # eventlink-api
//!
//! REST API server built with Axum. The same process mounts the
//! WebSocket push endpoint so the connection registry is shared
//! in-process with the HTTP handlers.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
