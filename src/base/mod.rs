pub mod repository;

pub use repository::{FeedRepository, FollowRepository, PostRepository, UserRepository};
