pub mod feed_repository;
pub mod follow_repository;
pub mod post_repository;
pub mod user_repository;

pub use feed_repository::SqliteFeedRepository;
pub use follow_repository::SqliteFollowRepository;
pub use post_repository::SqlitePostRepository;
pub use user_repository::SqliteUserRepository;
