use crate::domain::models::Story;
use crate::domain::validation::validate_story_content;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::StoryRepository;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Story creation, deletion and the active-window read path. Physical
/// deletion of expired rows belongs to `jobs::story_sweeper`.
#[derive(Clone)]
pub struct StoryService {
    stories: StoryRepository,
    ttl: Duration,
}

impl StoryService {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self {
            stories: StoryRepository::new(pool),
            ttl,
        }
    }

    pub async fn create_story(&self, owner: Uuid, content: &str) -> ServiceResult<Story> {
        validate_story_content(content).map_err(ServiceError::Validation)?;
        let story = self.stories.create(owner, content).await?;
        info!(story_id = %story.id, user_id = %owner, "created story");
        Ok(story)
    }

    /// Delete a story; owner only.
    pub async fn delete_story(&self, story_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        let story = self
            .stories
            .find_by_id(story_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("story".into()))?;

        if story.user_id != requester {
            return Err(ServiceError::Authorization(
                "only the story owner may delete it".into(),
            ));
        }
        self.stories.delete(story_id).await?;
        info!(%story_id, user_id = %requester, "deleted story");
        Ok(())
    }

    /// Stories by `owner` still inside the visibility window, most recent
    /// first. Expired rows are excluded even before the sweeper removes
    /// them.
    pub async fn active_stories_for(&self, owner: Uuid) -> ServiceResult<Vec<Story>> {
        let cutoff = Utc::now() - self.ttl;
        Ok(self.stories.active_stories_for(owner, cutoff).await?)
    }
}
