use crate::domain::models::{notification_recipient, NotificationKind, Relation, User};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{FollowRepository, NotificationRef, NotificationRepository, UserRepository};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Follow graph operations and the follow-notification side effect.
#[derive(Clone)]
pub struct FollowService {
    follows: FollowRepository,
    users: UserRepository,
    notifications: NotificationRepository,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            follows: FollowRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    /// Create a follow edge. Self-follows are rejected; repeat requests
    /// return the pre-existing relation and notify nobody. Only a newly
    /// inserted edge produces a notification to the followed user.
    pub async fn follow(&self, from: Uuid, to: Uuid) -> ServiceResult<Relation> {
        if from == to {
            return Err(ServiceError::invalid("to_user", "cannot follow yourself"));
        }
        if !self.users.exists(to).await? {
            return Err(ServiceError::NotFound("user".into()));
        }

        let (relation, was_created) = self.follows.create_follow(from, to).await?;

        if let Some(recipient) = notification_recipient(was_created, from, to) {
            self.notifications
                .create(
                    from,
                    recipient,
                    NotificationKind::Follow,
                    NotificationRef::Relation(relation.id),
                )
                .await?;
            info!(from_user = %from, to_user = %to, "created follow");
        }

        Ok(relation)
    }

    /// Remove a follow edge; a no-op when none exists.
    pub async fn unfollow(&self, from: Uuid, to: Uuid) -> ServiceResult<bool> {
        let removed = self.follows.delete_follow(from, to).await?;
        if removed {
            info!(from_user = %from, to_user = %to, "removed follow");
        }
        Ok(removed)
    }

    /// Snapshot of users following `user_id`, most recent relation first.
    pub async fn followers_of(&self, user_id: Uuid) -> ServiceResult<Vec<User>> {
        Ok(self.follows.followers_of(user_id).await?)
    }

    /// Snapshot of users that `user_id` follows, most recent relation first.
    pub async fn following_of(&self, user_id: Uuid) -> ServiceResult<Vec<User>> {
        Ok(self.follows.following_of(user_id).await?)
    }

    pub async fn is_following(&self, from: Uuid, to: Uuid) -> ServiceResult<bool> {
        Ok(self.follows.is_following(from, to).await?)
    }

    pub async fn follower_count(&self, user_id: Uuid) -> ServiceResult<i64> {
        Ok(self.follows.follower_count(user_id).await?)
    }

    pub async fn following_count(&self, user_id: Uuid) -> ServiceResult<i64> {
        Ok(self.follows.following_count(user_id).await?)
    }
}
