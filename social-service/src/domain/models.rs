use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Directed follow edge between two users
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Relation {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Post entity - a timestamped text body owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Like entity - represents a user liking a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Save entity - represents a user saving a post for later
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Save {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Story entity - short-lived text content with a visibility window
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Whether the story is still visible at `now` given the configured window.
    pub fn is_active_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.created_at + ttl > now
    }
}

/// Notification type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone started following the recipient
    Follow,
    /// Someone the recipient follows published a post
    Post,
    /// Someone commented on the recipient's post
    Comment,
    /// Someone liked the recipient's post
    Like,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::Post => "post",
            NotificationKind::Comment => "comment",
            NotificationKind::Like => "like",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "follow" => Ok(NotificationKind::Follow),
            "post" => Ok(NotificationKind::Post),
            "comment" => Ok(NotificationKind::Comment),
            "like" => Ok(NotificationKind::Like),
            other => Err(format!("unknown notification kind: {}", other)),
        }
    }
}

// The kind column is TEXT constrained by a CHECK; encode/decode through
// the enum so the accepted value set lives in one place.
impl sqlx::Type<sqlx::Postgres> for NotificationKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for NotificationKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::try_from(s).map_err(Into::into)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for NotificationKind {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Recipient of the notification produced by a relation/content
/// mutation, if any. A replayed idempotent mutation
/// (`was_created == false`) and a mutation an actor performs on their
/// own entity never notify.
pub fn notification_recipient(was_created: bool, actor: Uuid, owner: Uuid) -> Option<Uuid> {
    if was_created && actor != owner {
        Some(owner)
    } else {
        None
    }
}

/// Notification record addressed to one recipient.
///
/// Created only as a side effect of a relation or content mutation,
/// never directly by a user action. Exactly one of the reference
/// columns matching `kind` is set.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub kind: NotificationKind,
    pub relation_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub like_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_kind_round_trip() {
        for kind in [
            NotificationKind::Follow,
            NotificationKind::Post,
            NotificationKind::Comment,
            NotificationKind::Like,
        ] {
            assert_eq!(NotificationKind::try_from(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn notification_kind_rejects_unknown() {
        assert!(NotificationKind::try_from("mention").is_err());
    }

    #[test]
    fn new_row_notifies_the_other_party() {
        let actor = Uuid::new_v4();
        let owner = Uuid::new_v4();
        assert_eq!(notification_recipient(true, actor, owner), Some(owner));
    }

    #[test]
    fn replayed_mutation_never_notifies() {
        let actor = Uuid::new_v4();
        let owner = Uuid::new_v4();
        assert_eq!(notification_recipient(false, actor, owner), None);
    }

    #[test]
    fn self_action_never_notifies() {
        let actor = Uuid::new_v4();
        assert_eq!(notification_recipient(true, actor, actor), None);
    }

    #[test]
    fn story_active_within_window() {
        let created = Utc::now();
        let story = Story {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content: "hello".into(),
            created_at: created,
        };
        let ttl = Duration::hours(24);

        assert!(story.is_active_at(created + Duration::hours(23) + Duration::minutes(59), ttl));
        assert!(!story.is_active_at(created + Duration::hours(24) + Duration::minutes(1), ttl));
    }
}
