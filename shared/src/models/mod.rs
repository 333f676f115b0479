//! Data models
//!
//! Shared between ledger-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`, all amounts are minor units (`i64` cents).

pub mod advance;
pub mod earning;
pub mod invoice;
pub mod payment_model;
pub mod wallet;
pub mod worker;

// Re-exports
pub use advance::*;
pub use earning::*;
pub use invoice::*;
pub use payment_model::*;
pub use wallet::*;
pub use worker::*;
