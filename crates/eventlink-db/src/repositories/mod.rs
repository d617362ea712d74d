//! PostgreSQL repository implementations

mod application;
mod conversation;
mod error;
mod job;
mod job_alert;
mod notification;
mod rating;
mod settings;
mod user;

pub use application::PgApplicationRepository;
pub use conversation::PgConversationRepository;
pub use job::PgJobRepository;
pub use job_alert::PgJobAlertRepository;
pub use notification::PgNotificationRepository;
pub use rating::PgRatingRepository;
pub use settings::PgNotificationSettingsRepository;
pub use user::PgUserRepository;
