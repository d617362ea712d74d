//! # eventlink-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    ApplicationService, AuthService, ConversationService, JobAlertService, JobService, LogMailer,
    Mailer, NoopMailer, NotificationInput, NotificationService, RatingService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
