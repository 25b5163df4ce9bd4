pub mod feed;
pub mod follow;
pub mod post;
pub mod user;

pub use feed::{Feed, FeedId, FeedWithOwner};
pub use follow::{FeedFollow, FollowId};
pub use post::{Post, PostId};
pub use user::{User, UserId};
