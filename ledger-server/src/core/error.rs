//! Startup / runtime errors of the server process

use thiserror::Error;

use crate::auth::JwtError;
use crate::utils::AppError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT configuration error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Database initialization failed: {0}")]
    Database(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
