use crate::domain::models::{Notification, NotificationKind};
use sqlx::PgPool;
use uuid::Uuid;

/// Reference to the entity that triggered a notification. Exactly one
/// variant per kind; the matching column is set, the rest stay NULL.
#[derive(Debug, Clone, Copy)]
pub enum NotificationRef {
    Relation(Uuid),
    Post(Uuid),
    Comment(Uuid),
    Like(Uuid),
}

/// Repository for Notification operations
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single notification addressed to one recipient.
    pub async fn create(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
        kind: NotificationKind,
        reference: NotificationRef,
    ) -> Result<Notification, sqlx::Error> {
        let (relation_id, post_id, comment_id, like_id) = match reference {
            NotificationRef::Relation(id) => (Some(id), None, None, None),
            NotificationRef::Post(id) => (None, Some(id), None, None),
            NotificationRef::Comment(id) => (None, None, Some(id), None),
            NotificationRef::Like(id) => (None, None, None, Some(id)),
        };

        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (from_user_id, to_user_id, kind, relation_id, post_id, comment_id, like_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, from_user_id, to_user_id, kind, relation_id, post_id, comment_id, like_id, is_read, created_at
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(kind)
        .bind(relation_id)
        .bind(post_id)
        .bind(comment_id)
        .bind(like_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Batch fan-out for a new post: one notification per current follower
    /// of the author, in a single insert. The follower set is whatever the
    /// select sees at this moment; later followers get nothing. Returns
    /// the number of recipients.
    pub async fn fan_out_post(
        &self,
        author_id: Uuid,
        post_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (from_user_id, to_user_id, kind, post_id)
            SELECT $1, f.from_user_id, 'post', $2
            FROM follows f
            WHERE f.to_user_id = $1
            "#,
        )
        .bind(author_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_by_id(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, from_user_id, to_user_id, kind, relation_id, post_id, comment_id, like_id, is_read, created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Notifications addressed to `user_id`, most recent first.
    pub async fn notifications_for(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, from_user_id, to_user_id, kind, relation_id, post_id, comment_id, like_id, is_read, created_at
            FROM notifications
            WHERE to_user_id = $1 AND (NOT $2 OR is_read = FALSE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE to_user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Idempotent single mark-read.
    pub async fn mark_read(&self, notification_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// One bulk update over the recipient's unread rows; no
    /// read-then-write loop, so concurrent deliveries cannot be lost.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE to_user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, notification_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_for(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE to_user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
