use crate::domain::models::Story;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Story operations
#[derive(Clone)]
pub struct StoryRepository {
    pool: PgPool,
}

impl StoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, content: &str) -> Result<Story, sqlx::Error> {
        sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, story_id: Uuid) -> Result<Option<Story>, sqlx::Error> {
        sqlx::query_as::<_, Story>(
            r#"
            SELECT id, user_id, content, created_at
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, story_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(story_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stories by `user_id` created after `cutoff`, most recent first.
    /// The read path filters expired rows; physical deletion is the
    /// sweeper's job.
    pub async fn active_stories_for(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Story>, sqlx::Error> {
        sqlx::query_as::<_, Story>(
            r#"
            SELECT id, user_id, content, created_at
            FROM stories
            WHERE user_id = $1 AND created_at > $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
    }

    /// Delete every story created before `cutoff`; returns the count.
    /// Safe to run concurrently with story creation: a story created
    /// after the cutoff is computed is never a candidate.
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
