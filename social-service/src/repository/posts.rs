use crate::domain::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Post operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, body: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, body)
            VALUES ($1, $2)
            RETURNING id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_body(&self, post_id: Uuid, body: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Posts authored by `user_id`, most recent first.
    pub async fn posts_by(&self, user_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
