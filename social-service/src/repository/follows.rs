use crate::domain::models::{Relation, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for follow edges
#[derive(Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent edge insert. The `(from, to)` unique constraint resolves
    /// concurrent duplicate requests at the storage layer; when the insert
    /// is a no-op the pre-existing row is read back.
    ///
    /// Returns `(relation, was_created)`.
    pub async fn create_follow(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> Result<(Relation, bool), sqlx::Error> {
        let inserted = sqlx::query_as::<_, Relation>(
            r#"
            INSERT INTO follows (from_user_id, to_user_id)
            VALUES ($1, $2)
            ON CONFLICT (from_user_id, to_user_id) DO NOTHING
            RETURNING id, from_user_id, to_user_id, created_at
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(relation) = inserted {
            return Ok((relation, true));
        }

        let existing = sqlx::query_as::<_, Relation>(
            r#"
            SELECT id, from_user_id, to_user_id, created_at
            FROM follows
            WHERE from_user_id = $1 AND to_user_id = $2
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    /// Idempotent delete; returns true if a row was removed.
    pub async fn delete_follow(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let affected = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE from_user_id = $1 AND to_user_id = $2
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(affected > 0)
    }

    pub async fn is_following(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE from_user_id = $1 AND to_user_id = $2
            )
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Users following `user_id`, most recent relation first.
    pub async fn followers_of(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name,
                   u.bio, u.website_url, u.created_at, u.updated_at
            FROM follows f
            JOIN users u ON u.id = f.from_user_id
            WHERE f.to_user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Users that `user_id` follows, most recent relation first.
    pub async fn following_of(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name,
                   u.bio, u.website_url, u.created_at, u.updated_at
            FROM follows f
            JOIN users u ON u.id = f.to_user_id
            WHERE f.from_user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn follower_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE to_user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn following_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE from_user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
