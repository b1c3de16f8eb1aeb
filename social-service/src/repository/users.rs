use crate::domain::models::User;
use crate::domain::validation::{NewAccount, ProfileUpdate};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for user account rows
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Unique violations on username/email surface as
    /// `sqlx::Error::Database` and are classified by the caller.
    pub async fn create(&self, account: &NewAccount) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, bio, website_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, first_name, last_name, bio, website_url, created_at, updated_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.bio)
        .bind(&account.website_url)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, bio, website_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, bio, website_url, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Whether another user already holds this username.
    /// Excludes the owner so that re-submitting an unchanged username passes.
    pub async fn username_taken_by_other(
        &self,
        username: &str,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE username = $1 AND id <> $2
            )
            "#,
        )
        .bind(username)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Whether another user already holds this email address.
    pub async fn email_taken_by_other(
        &self,
        email: &str,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE email = $1 AND id <> $2
            )
            "#,
        )
        .bind(email)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, first_name = $4, last_name = $5,
                bio = $6, website_url = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, first_name, last_name, bio, website_url, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.bio)
        .bind(&update.website_url)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a user; the schema cascades to relations, content and
    /// notifications in both directions.
    pub async fn delete(&self, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, user_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
