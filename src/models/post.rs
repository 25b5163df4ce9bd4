use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::feed::FeedId;

/// Unique identifier for posts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single item ingested from a feed.
///
/// The (feed, url) pair is unique in storage; re-ingesting the same item is
/// rejected by constraint rather than pre-checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for the post
    pub id: PostId,
    /// The feed this post was ingested from
    pub feed_id: FeedId,
    /// Title of the post
    pub title: String,
    /// Link to the post. Kept as a plain string: feed items are not
    /// trusted to carry parseable URLs.
    pub url: String,
    /// Description or summary of the post
    pub description: String,
    /// Publication date, `None` when the source date could not be parsed
    pub published_at: Option<DateTime<Utc>>,
    /// When this post was ingested
    pub created_at: DateTime<Utc>,
    /// When this post was last updated
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new post belonging to the given feed
    pub fn new(
        feed_id: FeedId,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PostId(Uuid::new_v4().to_string()),
            feed_id,
            title: title.into(),
            url: url.into(),
            description: description.into(),
            published_at,
            created_at: now,
            updated_at: now,
        }
    }
}
