pub mod base;
pub mod cli;
pub mod config;
pub mod data;
pub mod models;
pub mod services;
pub mod utils;

// Re-export repository traits
pub use base::repository::{FeedRepository, FollowRepository, PostRepository, UserRepository};

// Re-export models
pub use models::{
    feed::{Feed, FeedId, FeedWithOwner},
    follow::{FeedFollow, FollowId},
    post::{Post, PostId},
    user::{User, UserId},
};

// Re-export the persistence entry points and services
pub use config::Config;
pub use data::{Database, StoreError};
pub use services::{
    dates::{parse_pub_date, DateParseError},
    fetcher::{FeedFetcher, FetchError, RssFeed, FEED_USER_AGENT},
    ingest::{IngestError, IngestService, TickReport},
};
