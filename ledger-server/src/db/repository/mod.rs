//! Repository Module
//!
//! Free functions over SQLite, one module per table. Functions that take
//! `&mut SqliteConnection` are meant to run inside a caller-owned transaction
//! (`&mut *tx`); functions taking an executor work against either.

pub mod advance;
pub mod appointment;
pub mod earning;
pub mod invoice;
pub mod invoice_counter;
pub mod salon;
pub mod wallet;
pub mod worker;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// SQLITE_BUSY / SQLITE_LOCKED after busy_timeout elapsed
    #[error("Database busy: {0}")]
    Busy(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if matches!(db.code().as_deref(), Some("5" | "6" | "517")) => {
                RepoError::Busy(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
