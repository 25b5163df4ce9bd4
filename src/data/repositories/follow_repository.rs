use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::base::repository::FollowRepository;
use crate::data::error::StoreResult;
use crate::data::repositories::feed_repository::map_feed_row;
use crate::models::{Feed, FeedFollow, FeedId, UserId};

/// SQLite-based feed-follow repository implementation
pub struct SqliteFollowRepository {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqliteFollowRepository {
    pub fn new(pool: Arc<Pool<SqliteConnectionManager>>) -> Self {
        Self { pool }
    }
}

impl FollowRepository for SqliteFollowRepository {
    fn create_follow(&self, follow: &FeedFollow) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO feed_follows (id, user_id, feed_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                follow.id.0,
                follow.user_id.0,
                follow.feed_id.0,
                follow.created_at,
            ],
        )?;
        Ok(())
    }

    fn delete_follow(&self, user_id: &UserId, feed_id: &FeedId) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM feed_follows WHERE user_id = ?1 AND feed_id = ?2",
            params![user_id.0, feed_id.0],
        )?;
        Ok(())
    }

    fn list_followed_feeds(&self, user_id: &UserId) -> StoreResult<Vec<Feed>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT f.id, f.user_id, f.name, f.url, f.last_fetched_at, f.created_at, f.updated_at
             FROM feeds f
             JOIN feed_follows ff ON ff.feed_id = f.id
             WHERE ff.user_id = ?1
             ORDER BY ff.created_at",
        )?;
        let rows = stmt.query_map(params![user_id.0], map_feed_row)?;

        let mut feeds = Vec::new();
        for feed in rows {
            feeds.push(feed?);
        }
        Ok(feeds)
    }
}
