//! Service context - dependency container for services
//!
//! Holds repositories, cache stores, the push broadcaster, the mailer,
//! and the other dependencies services need. Constructed once at
//! process start and injected into every service (no ambient globals).

use std::sync::Arc;

use eventlink_cache::{RefreshTokenStore, TokenBlacklist};
use eventlink_common::auth::JwtService;
use eventlink_core::traits::{
    ApplicationRepository, ConversationRepository, JobAlertRepository, JobRepository,
    NotificationRepository, NotificationSettingsRepository, RatingRepository, UserRepository,
};
use eventlink_core::SnowflakeGenerator;
use eventlink_realtime::PushBroadcaster;

use super::email::Mailer;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    job_repo: Arc<dyn JobRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    settings_repo: Arc<dyn NotificationSettingsRepository>,
    job_alert_repo: Arc<dyn JobAlertRepository>,
    rating_repo: Arc<dyn RatingRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,
    token_blacklist: TokenBlacklist,

    // Live push
    broadcaster: Arc<PushBroadcaster>,

    // Outbound email
    mailer: Arc<dyn Mailer>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the job repository
    pub fn job_repo(&self) -> &dyn JobRepository {
        self.job_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the notification settings repository
    pub fn settings_repo(&self) -> &dyn NotificationSettingsRepository {
        self.settings_repo.as_ref()
    }

    /// Get the job alert repository
    pub fn job_alert_repo(&self) -> &dyn JobAlertRepository {
        self.job_alert_repo.as_ref()
    }

    /// Get the rating repository
    pub fn rating_repo(&self) -> &dyn RatingRepository {
        self.rating_repo.as_ref()
    }

    // === Cache stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the access-token blacklist
    pub fn token_blacklist(&self) -> &TokenBlacklist {
        &self.token_blacklist
    }

    // === Live push ===

    /// Get the push broadcaster
    pub fn broadcaster(&self) -> &PushBroadcaster {
        &self.broadcaster
    }

    // === Email ===

    /// Get the mailer
    pub fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.mailer
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> eventlink_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("broadcaster", &self.broadcaster)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    job_repo: Option<Arc<dyn JobRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    settings_repo: Option<Arc<dyn NotificationSettingsRepository>>,
    job_alert_repo: Option<Arc<dyn JobAlertRepository>>,
    rating_repo: Option<Arc<dyn RatingRepository>>,
    refresh_token_store: Option<RefreshTokenStore>,
    token_blacklist: Option<TokenBlacklist>,
    broadcaster: Option<Arc<PushBroadcaster>>,
    mailer: Option<Arc<dyn Mailer>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn job_repo(mut self, repo: Arc<dyn JobRepository>) -> Self {
        self.job_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn NotificationSettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn job_alert_repo(mut self, repo: Arc<dyn JobAlertRepository>) -> Self {
        self.job_alert_repo = Some(repo);
        self
    }

    pub fn rating_repo(mut self, repo: Arc<dyn RatingRepository>) -> Self {
        self.rating_repo = Some(repo);
        self
    }

    pub fn refresh_token_store(mut self, store: RefreshTokenStore) -> Self {
        self.refresh_token_store = Some(store);
        self
    }

    pub fn token_blacklist(mut self, blacklist: TokenBlacklist) -> Self {
        self.token_blacklist = Some(blacklist);
        self
    }

    pub fn broadcaster(mut self, broadcaster: Arc<PushBroadcaster>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            job_repo: self
                .job_repo
                .ok_or_else(|| ServiceError::validation("job_repo is required"))?,
            application_repo: self
                .application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            conversation_repo: self
                .conversation_repo
                .ok_or_else(|| ServiceError::validation("conversation_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            settings_repo: self
                .settings_repo
                .ok_or_else(|| ServiceError::validation("settings_repo is required"))?,
            job_alert_repo: self
                .job_alert_repo
                .ok_or_else(|| ServiceError::validation("job_alert_repo is required"))?,
            rating_repo: self
                .rating_repo
                .ok_or_else(|| ServiceError::validation("rating_repo is required"))?,
            refresh_token_store: self
                .refresh_token_store
                .ok_or_else(|| ServiceError::validation("refresh_token_store is required"))?,
            token_blacklist: self
                .token_blacklist
                .ok_or_else(|| ServiceError::validation("token_blacklist is required"))?,
            broadcaster: self
                .broadcaster
                .ok_or_else(|| ServiceError::validation("broadcaster is required"))?,
            mailer: self
                .mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        })
    }
}
