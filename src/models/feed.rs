use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for feeds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedId(pub String);

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named RSS source registered by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    /// Unique identifier for the feed
    pub id: FeedId,
    /// The user who registered the feed
    pub user_id: UserId,
    /// Display name of the feed
    pub name: String,
    /// URL to the feed XML, unique across all feeds
    pub url: Url,
    /// When the ingestion loop last claimed this feed; `None` until the
    /// first fetch
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// When this feed was registered
    pub created_at: DateTime<Utc>,
    /// When this feed was last updated
    pub updated_at: DateTime<Utc>,
}

impl Feed {
    /// Creates a new, never-fetched feed owned by the given user
    pub fn new(user_id: UserId, name: impl Into<String>, url: Url) -> Self {
        let now = Utc::now();
        Self {
            id: FeedId(Uuid::new_v4().to_string()),
            user_id,
            name: name.into(),
            url,
            last_fetched_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A feed paired with its owner's name, for the `feeds` listing
#[derive(Debug, Clone)]
pub struct FeedWithOwner {
    pub feed: Feed,
    pub owner_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;

    #[test]
    fn test_new_feed_is_unfetched() {
        let owner = User::new("alice");
        let url = Url::parse("https://example.com/rss").unwrap();
        let feed = Feed::new(owner.id.clone(), "blog", url);

        assert_eq!(feed.user_id, owner.id);
        assert!(feed.last_fetched_at.is_none());
    }
}
