use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;

use crate::base::repository::{FeedRepository, FollowRepository, PostRepository, UserRepository};
use crate::data::repositories::{
    SqliteFeedRepository, SqliteFollowRepository, SqlitePostRepository, SqliteUserRepository,
};

const SCHEMA_SQL: &str = include_str!("../../data/schema.sql");

/// Owns the SQLite connection pool and hands out repositories
pub struct Database {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl Database {
    /// Opens (creating if necessary) the database at the given path and
    /// applies the schema
    pub fn open(path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        let pool = Pool::new(manager)
            .with_context(|| format!("failed to open database at {}", path.display()))?;

        let conn = pool.get()?;
        conn.execute_batch(SCHEMA_SQL)
            .context("failed to initialize database schema")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        Arc::new(SqliteUserRepository::new(self.pool.clone()))
    }

    pub fn feed_repository(&self) -> Arc<dyn FeedRepository> {
        Arc::new(SqliteFeedRepository::new(self.pool.clone()))
    }

    pub fn follow_repository(&self) -> Arc<dyn FollowRepository> {
        Arc::new(SqliteFollowRepository::new(self.pool.clone()))
    }

    pub fn post_repository(&self) -> Arc<dyn PostRepository> {
        Arc::new(SqlitePostRepository::new(self.pool.clone()))
    }
}

/// Builds a single-connection in-memory pool with the schema applied.
/// A pooled `:memory:` database is private to its connection, so the pool
/// is capped at one.
#[cfg(test)]
pub(crate) fn test_pool() -> Arc<Pool<SqliteConnectionManager>> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    pool.get().unwrap().execute_batch(SCHEMA_SQL).unwrap();
    Arc::new(pool)
}
