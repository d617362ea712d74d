//! User entity <-> model mapper

use eventlink_core::entities::{User, UserRole};
use eventlink_core::{DomainError, Snowflake};

use crate::models::UserModel;

use super::bad_enum;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&model.role)
            .ok_or_else(|| bad_enum("users", "role", &model.role))?;

        Ok(User {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            role,
            headline: model.headline,
            bio: model.bio,
            location: model.location,
            skills: model.skills,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(role: &str) -> UserModel {
        UserModel {
            id: 1,
            email: "a@b.c".into(),
            display_name: "A".into(),
            role: role.into(),
            headline: None,
            bio: None,
            location: None,
            skills: vec!["sound".into()],
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_maps_known_role() {
        let user = User::try_from(model("recruiter")).unwrap();
        assert_eq!(user.role, UserRole::Recruiter);
        assert_eq!(user.skills, vec!["sound".to_string()]);
    }

    #[test]
    fn test_rejects_unknown_role() {
        assert!(User::try_from(model("wizard")).is_err());
    }
}
