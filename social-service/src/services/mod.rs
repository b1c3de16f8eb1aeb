pub mod accounts;
pub mod comments;
pub mod engagement;
pub mod follow;
pub mod notifications;
pub mod posts;
pub mod stories;

pub use accounts::AccountService;
pub use comments::CommentService;
pub use engagement::EngagementService;
pub use follow::FollowService;
pub use notifications::NotificationService;
pub use posts::PostService;
pub use stories::StoryService;
