use thiserror::Error;

/// Errors surfaced by the persistence layer.
///
/// Unique-key violations are reported as [`StoreError::Duplicate`] so that
/// callers can treat "already exists" separately from real write failures
/// without pattern-matching driver internals.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Duplicate,
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(cause, _) = &err {
            if cause.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || cause.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            {
                return StoreError::Duplicate;
            }
        }
        StoreError::Sqlite(err)
    }
}

/// Result type alias for persistence operations
pub type StoreResult<T> = Result<T, StoreError>;
