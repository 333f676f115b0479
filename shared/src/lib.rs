//! Shared types for the salon ledger
//!
//! Models, error codes and response structures used by the ledger server
//! and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
