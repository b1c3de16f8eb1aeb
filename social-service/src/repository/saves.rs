use crate::domain::models::Save;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Save (saved-post) operations
#[derive(Clone)]
pub struct SaveRepository {
    pool: PgPool,
}

impl SaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent set-membership insert on the `(user, post)` unique
    /// constraint. Returns `(save, was_created)`.
    pub async fn create_save(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(Save, bool), sqlx::Error> {
        let inserted = sqlx::query_as::<_, Save>(
            r#"
            INSERT INTO saves (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            RETURNING id, user_id, post_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(save) = inserted {
            return Ok((save, true));
        }

        let existing = sqlx::query_as::<_, Save>(
            r#"
            SELECT id, user_id, post_id, created_at
            FROM saves
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    /// Delete a save (idempotent - returns whether a row was removed)
    pub async fn delete_save(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM saves
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if user has saved a post
    pub async fn has_saved(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM saves
                WHERE user_id = $1 AND post_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Posts saved by a user, most recently saved first.
    pub async fn saved_post_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT post_id
            FROM saves
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Get save count for a post
    pub async fn save_count(&self, post_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM saves WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
    }
}
