use std::sync::Arc;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use url::Url;

use crate::base::repository::FeedRepository;
use crate::data::error::StoreResult;
use crate::models::{Feed, FeedId, FeedWithOwner, UserId};

/// SQLite-based feed repository implementation
pub struct SqliteFeedRepository {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqliteFeedRepository {
    pub fn new(pool: Arc<Pool<SqliteConnectionManager>>) -> Self {
        Self { pool }
    }
}

/// Maps a `SELECT id, user_id, name, url, last_fetched_at, created_at,
/// updated_at` row to a [`Feed`]. Shared with the follow repository, which
/// selects the same columns through a join.
pub(crate) fn map_feed_row(row: &Row) -> rusqlite::Result<Feed> {
    let url: String = row.get(3)?;
    let url = Url::parse(&url)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Feed {
        id: FeedId(row.get(0)?),
        user_id: UserId(row.get(1)?),
        name: row.get(2)?,
        url,
        last_fetched_at: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl FeedRepository for SqliteFeedRepository {
    fn create_feed(&self, feed: &Feed) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO feeds (id, user_id, name, url, last_fetched_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                feed.id.0,
                feed.user_id.0,
                feed.name,
                feed.url.to_string(),
                feed.last_fetched_at,
                feed.created_at,
                feed.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find_feed_by_url(&self, url: &str) -> StoreResult<Option<Feed>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, url, last_fetched_at, created_at, updated_at
             FROM feeds WHERE url = ?1",
        )?;
        let feed = stmt.query_row(params![url], map_feed_row).optional()?;
        Ok(feed)
    }

    fn list_feeds(&self) -> StoreResult<Vec<FeedWithOwner>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT f.id, f.user_id, f.name, f.url, f.last_fetched_at, f.created_at,
                    f.updated_at, u.name
             FROM feeds f
             JOIN users u ON u.id = f.user_id
             ORDER BY f.created_at",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FeedWithOwner {
                feed: map_feed_row(row)?,
                owner_name: row.get(7)?,
            })
        })?;

        let mut feeds = Vec::new();
        for feed in rows {
            feeds.push(feed?);
        }
        Ok(feeds)
    }

    fn next_feed_to_fetch(&self) -> StoreResult<Option<Feed>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, url, last_fetched_at, created_at, updated_at
             FROM feeds
             ORDER BY last_fetched_at ASC NULLS FIRST
             LIMIT 1",
        )?;
        let feed = stmt.query_row([], map_feed_row).optional()?;
        Ok(feed)
    }

    fn mark_feed_fetched(&self, id: &FeedId, fetched_at: DateTime<Utc>) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "UPDATE feeds SET last_fetched_at = ?1, updated_at = ?1 WHERE id = ?2",
            params![fetched_at, id.0],
        )?;
        Ok(())
    }
}
