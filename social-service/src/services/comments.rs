use crate::domain::models::{notification_recipient, Comment, NotificationKind};
use crate::domain::validation::validate_comment_body;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{CommentRepository, NotificationRef, NotificationRepository, PostRepository};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Comment operations and the comment-notification side effect.
#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    posts: PostRepository,
    notifications: NotificationRepository,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            comments: CommentRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    /// Comment on a post. The post owner is notified unless they are the
    /// commenter.
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        body: &str,
    ) -> ServiceResult<Comment> {
        validate_comment_body(body).map_err(ServiceError::Validation)?;

        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("post".into()))?;

        let comment = self.comments.create(post_id, user_id, body).await?;

        // A comment insert always creates a row, so only the self-actor
        // rule can suppress the notification.
        if let Some(recipient) = notification_recipient(true, user_id, post.user_id) {
            self.notifications
                .create(
                    user_id,
                    recipient,
                    NotificationKind::Comment,
                    NotificationRef::Comment(comment.id),
                )
                .await?;
        }

        info!(comment_id = %comment.id, %post_id, %user_id, "created comment");
        Ok(comment)
    }

    /// Delete a comment; comment owner only.
    pub async fn delete_comment(&self, comment_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("comment".into()))?;

        if comment.user_id != requester {
            return Err(ServiceError::Authorization(
                "only the comment owner may delete it".into(),
            ));
        }
        self.comments.delete(comment_id).await?;
        info!(%comment_id, user_id = %requester, "deleted comment");
        Ok(())
    }

    /// Comments on a post, most recent first.
    pub async fn comments_for(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        Ok(self.comments.comments_for(post_id).await?)
    }
}
