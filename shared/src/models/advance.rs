//! Advance Model (预支)

use serde::{Deserialize, Serialize};

/// Advance status
///
/// Advances are created `approved`; `deducted` is only reached through invoice
/// generation. `pending` exists for data imported from older records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AdvanceStatus {
    Pending,
    Approved,
    Deducted,
}

/// Cash given to a worker ahead of earnings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Advance {
    pub id: i64,
    pub salon_id: i64,
    pub worker_id: i64,
    /// Minor units, always > 0
    pub amount: i64,
    pub reason: String,
    pub status: AdvanceStatus,
    /// User id of the owner who handed out the cash
    pub given_by: i64,
    pub given_at: i64,
    pub deducted_at: Option<i64>,
    pub invoice_id: Option<i64>,
}

/// Give advance payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceCreate {
    pub amount: i64,
    pub reason: String,
}

/// Advance list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvanceQuery {
    pub status: Option<AdvanceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceList {
    pub advances: Vec<Advance>,
    /// Sum over `approved` advances
    pub total_outstanding: i64,
    /// Sum over all advances
    pub total_given: i64,
}
