use crate::domain::models::Post;
use crate::domain::validation::validate_post_body;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{NotificationRepository, PostRepository};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Post CRUD and the post-creation fan-out.
#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    notifications: NotificationRepository,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    /// Create a post, then fan out one notification per current follower
    /// in a single batch insert. The follower set is the snapshot at this
    /// moment; the fan-out is not atomic with the post insert, and a
    /// failure between the two leaves a post without notifications.
    pub async fn create_post(&self, owner: Uuid, body: &str) -> ServiceResult<Post> {
        validate_post_body(body).map_err(ServiceError::Validation)?;

        let post = self.posts.create(owner, body).await?;
        let recipients = self.notifications.fan_out_post(owner, post.id).await?;

        info!(post_id = %post.id, user_id = %owner, recipients, "created post");
        Ok(post)
    }

    /// Edit a post's body; owner only. Later followers of the author get
    /// no retroactive notification.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        requester: Uuid,
        body: &str,
    ) -> ServiceResult<Post> {
        validate_post_body(body).map_err(ServiceError::Validation)?;

        let post = self.get_post(post_id).await?;
        if post.user_id != requester {
            return Err(ServiceError::Authorization(
                "only the post owner may edit it".into(),
            ));
        }
        Ok(self.posts.update_body(post_id, body).await?)
    }

    /// Delete a post; owner only. Cascades to comments, likes, saves and
    /// notifications referencing it.
    pub async fn delete_post(&self, post_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        let post = self.get_post(post_id).await?;
        if post.user_id != requester {
            return Err(ServiceError::Authorization(
                "only the post owner may delete it".into(),
            ));
        }
        self.posts.delete(post_id).await?;
        info!(%post_id, user_id = %requester, "deleted post");
        Ok(())
    }

    pub async fn get_post(&self, post_id: Uuid) -> ServiceResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("post".into()))
    }

    /// Posts authored by `user_id`, most recent first.
    pub async fn posts_by(&self, user_id: Uuid) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.posts_by(user_id).await?)
    }
}
