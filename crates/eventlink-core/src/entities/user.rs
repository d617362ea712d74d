//! User entity - an account on either side of the marketplace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Event-technical crew looking for work
    Freelancer,
    /// Company/recruiter posting jobs
    Recruiter,
    /// Platform administrator
    Admin,
}

impl UserRole {
    /// String form used in the database and in JSON
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Freelancer => "freelancer",
            Self::Recruiter => "recruiter",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its string form
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "freelancer" => Some(Self::Freelancer),
            "recruiter" => Some(Self::Recruiter),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[inline]
    #[must_use]
    pub fn is_recruiter(self) -> bool {
        matches!(self, Self::Recruiter)
    }

    #[inline]
    #[must_use]
    pub fn is_freelancer(self) -> bool {
        matches!(self, Self::Freelancer)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity with profile fields
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with an empty profile
    pub fn new(id: Snowflake, email: String, display_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name,
            role,
            headline: None,
            bio: None,
            location: None,
            skills: Vec::new(),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this user may act on another user's notification
    #[inline]
    pub fn can_manage_notifications_of(&self, owner_id: Snowflake) -> bool {
        self.id == owner_id || self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [UserRole::Freelancer, UserRole::Recruiter, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&UserRole::Freelancer).unwrap();
        assert_eq!(json, "\"freelancer\"");
    }

    #[test]
    fn test_notification_authorization() {
        let owner = Snowflake::new(10);
        let other = Snowflake::new(20);

        let user = User::new(owner, "a@b.c".into(), "A".into(), UserRole::Freelancer);
        assert!(user.can_manage_notifications_of(owner));
        assert!(!user.can_manage_notifications_of(other));

        let admin = User::new(Snowflake::new(1), "x@y.z".into(), "X".into(), UserRole::Admin);
        assert!(admin.can_manage_notifications_of(other));
    }
}
