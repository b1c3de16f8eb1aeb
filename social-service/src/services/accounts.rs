use crate::domain::models::User;
use crate::domain::validation::{
    validate_new_account, validate_profile_update, NewAccount, ProfileUpdate, ValidationErrors,
};
use crate::error::{unique_violation, ServiceError, ServiceResult};
use crate::repository::UserRepository;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Account registration, profile edits and deletion.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account. A unique-constraint race on username or
    /// email comes back as a field-level validation outcome, not a 500.
    pub async fn register(&self, account: NewAccount) -> ServiceResult<User> {
        validate_new_account(&account).map_err(ServiceError::Validation)?;

        let user = self.users.create(&account).await.map_err(|e| {
            match unique_violation(&e).as_deref() {
                Some("users_username_key") => {
                    ServiceError::invalid("username", "already exists")
                }
                Some("users_email_key") => ServiceError::invalid("email", "already exists"),
                _ => ServiceError::Database(e),
            }
        })?;

        info!(user_id = %user.id, username = %user.username, "registered account");
        Ok(user)
    }

    /// Edit an account. Uniqueness is checked against other users only,
    /// so keeping the current username or email always passes.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        requester: Uuid,
        update: ProfileUpdate,
    ) -> ServiceResult<User> {
        if requester != user_id {
            return Err(ServiceError::Authorization(
                "only the account owner may edit it".into(),
            ));
        }
        validate_profile_update(&update).map_err(ServiceError::Validation)?;

        let mut taken = ValidationErrors::new();
        if self
            .users
            .username_taken_by_other(&update.username, user_id)
            .await?
        {
            taken.push("username", "already exists");
        }
        if self.users.email_taken_by_other(&update.email, user_id).await? {
            taken.push("email", "already exists");
        }
        taken.into_result().map_err(ServiceError::Validation)?;

        let user = self
            .users
            .update_profile(user_id, &update)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user".into()))?;

        info!(user_id = %user.id, "updated profile");
        Ok(user)
    }

    /// Delete an account; the schema cascades to relations, content and
    /// notifications in both directions.
    pub async fn delete_account(&self, user_id: Uuid, requester: Uuid) -> ServiceResult<()> {
        if requester != user_id {
            return Err(ServiceError::Authorization(
                "only the account owner may delete it".into(),
            ));
        }
        if !self.users.delete(user_id).await? {
            return Err(ServiceError::NotFound("user".into()));
        }
        info!(%user_id, "deleted account");
        Ok(())
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user".into()))
    }

    pub async fn find_by_username(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user".into()))
    }
}
