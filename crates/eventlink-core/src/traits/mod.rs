//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ApplicationRepository, ConversationRepository, JobAlertRepository, JobRepository, MessageQuery,
    NotificationRepository, NotificationSettingsRepository, RatingRepository, RepoResult,
    UserRepository,
};
