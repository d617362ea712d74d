//! # eventlink-db
//!
//! Database layer implementing the `eventlink-core` repository traits
//! with PostgreSQL via SQLx: connection pool management, `FromRow`
//! models, entity <-> model mappers, and repository implementations.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgApplicationRepository, PgConversationRepository, PgJobAlertRepository, PgJobRepository,
    PgNotificationRepository, PgNotificationSettingsRepository, PgRatingRepository,
    PgUserRepository,
};
