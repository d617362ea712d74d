//! Application state
//!
//! Shared state for the Axum application: the service context, the
//! realtime connection registry, and configuration.

use std::sync::Arc;

use eventlink_common::{AppConfig, JwtService};
use eventlink_realtime::ConnectionRegistry;
use eventlink_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Live connection registry (also reachable via the broadcaster)
    registry: Arc<ConnectionRegistry>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        registry: Arc<ConnectionRegistry>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            registry,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
