//! Domain entities

mod application;
mod conversation;
mod job;
mod job_alert;
mod notification;
mod rating;
mod settings;
mod user;

pub use application::{Application, ApplicationStatus};
pub use conversation::{Conversation, Message, Participant};
pub use job::{Job, JobStatus};
pub use job_alert::JobAlert;
pub use notification::{
    Notification, NotificationCategory, NotificationPriority, NotificationType,
};
pub use rating::Rating;
pub use settings::{DigestMode, NotificationSettings};
pub use user::{User, UserRole};
