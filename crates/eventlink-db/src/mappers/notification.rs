//! Notification entity <-> model mapper

use eventlink_core::entities::{Notification, NotificationPriority, NotificationType};
use eventlink_core::{DomainError, Snowflake};

use crate::models::NotificationModel;

use super::bad_enum;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind = NotificationType::parse(&model.kind)
            .ok_or_else(|| bad_enum("notifications", "kind", &model.kind))?;
        let priority = NotificationPriority::parse(&model.priority)
            .ok_or_else(|| bad_enum("notifications", "priority", &model.priority))?;

        Ok(Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            kind,
            title: model.title,
            message: model.message,
            is_read: model.is_read,
            priority,
            related_entity_type: model.related_entity_type,
            related_entity_id: model.related_entity_id.map(Snowflake::new),
            action_url: model.action_url,
            metadata: model.metadata,
            expires_at: model.expires_at,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eventlink_core::entities::NotificationCategory;

    fn model(kind: &str) -> NotificationModel {
        NotificationModel {
            id: 1,
            user_id: 2,
            kind: kind.into(),
            title: "t".into(),
            message: "m".into(),
            is_read: false,
            priority: "normal".into(),
            related_entity_type: Some("conversation".into()),
            related_entity_id: Some(3),
            action_url: None,
            metadata: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_maps_known_kind() {
        let n = Notification::try_from(model("new_message")).unwrap();
        assert_eq!(n.kind, NotificationType::NewMessage);
        assert_eq!(n.category(), NotificationCategory::Messages);
        assert_eq!(n.related_entity_id, Some(Snowflake::new(3)));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Notification::try_from(model("carrier_pigeon")).is_err());
    }
}
