pub mod comments;
pub mod follows;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod saves;
pub mod stories;
pub mod users;

pub use comments::CommentRepository;
pub use follows::FollowRepository;
pub use likes::LikeRepository;
pub use notifications::{NotificationRef, NotificationRepository};
pub use posts::PostRepository;
pub use saves::SaveRepository;
pub use stories::StoryRepository;
pub use users::UserRepository;
