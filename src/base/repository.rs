use chrono::{DateTime, Utc};

use crate::data::error::StoreResult;
use crate::models::{Feed, FeedFollow, FeedId, FeedWithOwner, Post, User, UserId};

/// Storage operations for users
pub trait UserRepository: Send + Sync {
    /// Persists a new user. Fails with `StoreError::Duplicate` when the
    /// name is already taken.
    fn create_user(&self, user: &User) -> StoreResult<()>;
    /// Looks a user up by display name; `None` means not found
    fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>>;
    /// Returns all users, oldest registration first
    fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Deletes every user; feeds, follows, and posts go with them
    fn delete_all_users(&self) -> StoreResult<()>;
}

/// Storage operations for feeds
pub trait FeedRepository: Send + Sync {
    /// Persists a new feed. Fails with `StoreError::Duplicate` when the
    /// URL is already registered.
    fn create_feed(&self, feed: &Feed) -> StoreResult<()>;
    /// Looks a feed up by its URL; `None` means not found
    fn find_feed_by_url(&self, url: &str) -> StoreResult<Option<Feed>>;
    /// Returns all feeds together with their owners' names
    fn list_feeds(&self) -> StoreResult<Vec<FeedWithOwner>>;
    /// Returns the feed whose `last_fetched_at` is oldest, with
    /// never-fetched feeds first. `None` means no feed exists.
    fn next_feed_to_fetch(&self) -> StoreResult<Option<Feed>>;
    /// Stamps the feed's `last_fetched_at`, removing it from the front of
    /// the fetch queue
    fn mark_feed_fetched(&self, id: &FeedId, fetched_at: DateTime<Utc>) -> StoreResult<()>;
}

/// Storage operations for feed follows
pub trait FollowRepository: Send + Sync {
    /// Persists a new follow. Fails with `StoreError::Duplicate` when the
    /// user already follows the feed.
    fn create_follow(&self, follow: &FeedFollow) -> StoreResult<()>;
    /// Removes the follow linking the user to the feed, if any
    fn delete_follow(&self, user_id: &UserId, feed_id: &FeedId) -> StoreResult<()>;
    /// Returns the feeds the user follows, earliest follow first
    fn list_followed_feeds(&self, user_id: &UserId) -> StoreResult<Vec<Feed>>;
}

/// Storage operations for posts
pub trait PostRepository: Send + Sync {
    /// Persists a new post. Fails with `StoreError::Duplicate` when the
    /// feed already has a post with the same URL.
    fn create_post(&self, post: &Post) -> StoreResult<()>;
    /// Returns the most recently published posts from the feeds the user
    /// follows
    fn list_posts_for_user(&self, user_id: &UserId, limit: u32) -> StoreResult<Vec<Post>>;
}
