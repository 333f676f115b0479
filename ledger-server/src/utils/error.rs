//! 统一错误处理
//!
//! Re-exports the shared error system and bridges repository failures into it.
//! Database failures are logged here, once, at the boundary.

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Busy(msg) => {
                tracing::warn!(target: "database", error = %msg, "Database busy");
                AppError::with_message(ErrorCode::SystemBusy, msg)
            }
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::Duplicate("earning".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = RepoError::Busy("locked".into()).into();
        assert_eq!(err.code, ErrorCode::SystemBusy);
        assert_eq!(err.http_status(), http::StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
