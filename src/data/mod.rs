pub mod database;
pub mod error;
pub mod repositories;

pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use repositories::{
    SqliteFeedRepository, SqliteFollowRepository, SqlitePostRepository, SqliteUserRepository,
};
