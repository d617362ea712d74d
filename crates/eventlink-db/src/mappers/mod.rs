//! Model <-> entity mappers
//!
//! Row models convert into domain entities with `TryFrom`; an enum
//! column holding an unknown value surfaces as a `DatabaseError`
//! rather than being silently coerced.

mod application;
mod conversation;
mod job;
mod job_alert;
mod notification;
mod rating;
mod settings;
mod user;

use eventlink_core::DomainError;

/// Error for an enum column holding a value the domain does not know
pub(crate) fn bad_enum(table: &str, column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("{table}.{column} holds unknown value '{value}'"))
}
