use crate::domain::models::Notification;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::NotificationRepository;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Recipient-facing notification operations. Notifications are only ever
/// created by relation/content mutations; this service reads and mutates
/// them on behalf of the recipient.
#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            notifications: NotificationRepository::new(pool),
        }
    }

    pub async fn notifications_for(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> ServiceResult<Vec<Notification>> {
        Ok(self
            .notifications
            .notifications_for(user_id, unread_only)
            .await?)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> ServiceResult<i64> {
        Ok(self.notifications.unread_count(user_id).await?)
    }

    /// Mark one notification read; recipient only, idempotent.
    pub async fn mark_read(&self, notification_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        let notification = self.owned_by(notification_id, requester).await?;
        if !notification.is_read {
            self.notifications.mark_read(notification_id).await?;
        }
        Ok(())
    }

    /// Mark every unread notification read in one bulk update; calling it
    /// with nothing unread is a no-op.
    pub async fn mark_all_read(&self, user_id: Uuid) -> ServiceResult<u64> {
        let updated = self.notifications.mark_all_read(user_id).await?;
        if updated > 0 {
            info!(%user_id, updated, "marked all notifications read");
        }
        Ok(updated)
    }

    /// Delete one notification; recipient only.
    pub async fn delete(&self, notification_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        self.owned_by(notification_id, requester).await?;
        self.notifications.delete(notification_id).await?;
        Ok(())
    }

    /// Delete every notification addressed to `user_id`.
    pub async fn delete_all(&self, user_id: Uuid) -> ServiceResult<u64> {
        let deleted = self.notifications.delete_all_for(user_id).await?;
        if deleted > 0 {
            info!(%user_id, deleted, "deleted all notifications");
        }
        Ok(deleted)
    }

    async fn owned_by(
        &self,
        notification_id: Uuid,
        requester: Uuid,
    ) -> ServiceResult<Notification> {
        let notification = self
            .notifications
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("notification".into()))?;

        if notification.to_user_id != requester {
            return Err(ServiceError::Authorization(
                "only the recipient may act on a notification".into(),
            ));
        }
        Ok(notification)
    }
}
