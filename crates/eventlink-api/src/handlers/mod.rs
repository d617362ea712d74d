//! Request handlers

pub mod applications;
pub mod auth;
pub mod conversations;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod ratings;
pub mod users;
