//! Server setup and initialization
//!
//! Wires pools, repositories, the in-process connection registry, the
//! broadcaster, and the service context, then mounts the REST routes
//! and the WebSocket endpoint on one router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use eventlink_cache::{RedisPool, RedisPoolConfig, RefreshTokenStore, TokenBlacklist};
use eventlink_common::{AppConfig, AppError, JwtService};
use eventlink_core::SnowflakeGenerator;
use eventlink_db::{
    create_pool, PgApplicationRepository, PgConversationRepository, PgJobAlertRepository,
    PgJobRepository, PgNotificationRepository, PgNotificationSettingsRepository,
    PgRatingRepository, PgUserRepository,
};
use eventlink_realtime::{ws_handler, ConnectionRegistry, PushBroadcaster, RealtimeState};
use eventlink_service::{LogMailer, NoopMailer, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let realtime_state = RealtimeState::new(state.registry().clone());
    let ws_routes = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(realtime_state);

    let api = apply_middleware(
        create_router(),
        &state.config().rate_limit,
        &state.config().cors,
        state.config().app.env.is_production(),
    );

    // Health checks bypass the rate limiter; /ws carries its own state
    Router::new()
        .merge(api)
        .merge(health_routes())
        .with_state(state)
        .merge(ws_routes)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Database pool
    info!("Connecting to PostgreSQL...");
    let db_config = eventlink_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    eventlink_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("PostgreSQL connection established and migrated");

    // Redis pool
    info!("Connecting to Redis...");
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis connection established");

    // Auth primitives
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let refresh_token_store =
        RefreshTokenStore::with_ttl(redis_pool.clone(), config.jwt.refresh_token_expiry as u64);
    let token_blacklist = TokenBlacklist::new(redis_pool.clone());

    // ID generation
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // In-process live push: one registry, one broadcaster, injected
    // everywhere that needs to push
    let registry = ConnectionRegistry::new_shared();
    let broadcaster = Arc::new(PushBroadcaster::new(registry.clone()));

    // Outbound email
    let mailer: Arc<dyn eventlink_service::Mailer> = if config.email.enabled {
        Arc::new(LogMailer::new(config.email.from_address.clone()))
    } else {
        Arc::new(NoopMailer)
    };

    // Repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let job_repo = Arc::new(PgJobRepository::new(pool.clone()));
    let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
    let conversation_repo = Arc::new(PgConversationRepository::new(pool.clone()));
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));
    let settings_repo = Arc::new(PgNotificationSettingsRepository::new(pool.clone()));
    let job_alert_repo = Arc::new(PgJobAlertRepository::new(pool.clone()));
    let rating_repo = Arc::new(PgRatingRepository::new(pool));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .job_repo(job_repo)
        .application_repo(application_repo)
        .conversation_repo(conversation_repo)
        .notification_repo(notification_repo)
        .settings_repo(settings_repo)
        .job_alert_repo(job_alert_repo)
        .rating_repo(rating_repo)
        .refresh_token_store(refresh_token_store)
        .token_blacklist(token_blacklist)
        .broadcaster(broadcaster)
        .mailer(mailer)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, registry, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
