use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::feed::FeedId;
use super::user::UserId;

/// Unique identifier for feed follows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowId(pub String);

impl fmt::Display for FollowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's subscription to a feed, distinct from feed ownership.
///
/// At most one follow exists per (user, feed) pair; the persistence layer
/// enforces this with a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedFollow {
    pub id: FollowId,
    pub user_id: UserId,
    pub feed_id: FeedId,
    pub created_at: DateTime<Utc>,
}

impl FeedFollow {
    /// Creates a new follow linking the given user to the given feed
    pub fn new(user_id: UserId, feed_id: FeedId) -> Self {
        Self {
            id: FollowId(Uuid::new_v4().to_string()),
            user_id,
            feed_id,
            created_at: Utc::now(),
        }
    }
}
