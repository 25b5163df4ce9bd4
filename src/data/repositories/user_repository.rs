use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};

use crate::base::repository::UserRepository;
use crate::data::error::StoreResult;
use crate::models::{User, UserId};

/// SQLite-based user repository implementation
pub struct SqliteUserRepository {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<Pool<SqliteConnectionManager>>) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: UserId(row.get(0)?),
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn create_user(&self, user: &User) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.id.0, user.name, user.created_at, user.updated_at],
        )?;
        Ok(())
    }

    fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, updated_at FROM users WHERE name = ?1",
        )?;
        let user = stmt.query_row(params![name], Self::map_row).optional()?;
        Ok(user)
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, updated_at FROM users ORDER BY created_at",
        )?;
        let rows = stmt.query_map([], Self::map_row)?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }
        Ok(users)
    }

    fn delete_all_users(&self) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM users", [])?;
        Ok(())
    }
}
