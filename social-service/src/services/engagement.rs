use crate::domain::models::{notification_recipient, Like, NotificationKind, Save};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{
    LikeRepository, NotificationRef, NotificationRepository, PostRepository, SaveRepository,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Like and save toggles. Both are idempotent set-membership operations;
/// only likes notify, and only on a genuinely new row addressed to
/// someone other than the actor.
#[derive(Clone)]
pub struct EngagementService {
    likes: LikeRepository,
    saves: SaveRepository,
    posts: PostRepository,
    notifications: NotificationRepository,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            likes: LikeRepository::new(pool.clone()),
            saves: SaveRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    /// Like a post. A replayed like returns the existing row and never
    /// re-notifies; liking one's own post inserts the row but notifies
    /// nobody.
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Like> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("post".into()))?;

        let (like, was_created) = self.likes.create_like(user_id, post_id).await?;

        if let Some(recipient) = notification_recipient(was_created, user_id, post.user_id) {
            self.notifications
                .create(
                    user_id,
                    recipient,
                    NotificationKind::Like,
                    NotificationRef::Like(like.id),
                )
                .await?;
        }

        if was_created {
            info!(%post_id, %user_id, "created like");
        }
        Ok(like)
    }

    /// Remove a like; a no-op when absent.
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.likes.delete_like(user_id, post_id).await?)
    }

    /// Save a post for later; idempotent and never notifies.
    pub async fn save(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Save> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(ServiceError::NotFound("post".into()));
        }
        let (save, was_created) = self.saves.create_save(user_id, post_id).await?;
        if was_created {
            info!(%post_id, %user_id, "created save");
        }
        Ok(save)
    }

    /// Remove a save; a no-op when absent.
    pub async fn unsave(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.saves.delete_save(user_id, post_id).await?)
    }

    pub async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.likes.has_liked(user_id, post_id).await?)
    }

    pub async fn has_saved(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.saves.has_saved(user_id, post_id).await?)
    }

    pub async fn like_count(&self, post_id: Uuid) -> ServiceResult<i64> {
        Ok(self.likes.like_count(post_id).await?)
    }

    pub async fn save_count(&self, post_id: Uuid) -> ServiceResult<i64> {
        Ok(self.saves.save_count(post_id).await?)
    }
}
