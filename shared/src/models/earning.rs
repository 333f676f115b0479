//! Earning Model (技师业绩)

use serde::{Deserialize, Serialize};

/// One service rendered by a worker
///
/// `worker_earning` is fixed at creation time. Only `is_paid` (client settled
/// with the salon) and `invoice_id` (settled into a payout) ever change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Earning {
    pub id: i64,
    pub salon_id: i64,
    pub worker_id: i64,
    pub appointment_id: i64,
    pub service_id: i64,
    /// Service name snapshot (invoice line items)
    pub service_name: Option<String>,
    /// Price charged, minor units
    pub service_price: i64,
    pub original_price: Option<i64>,
    pub final_price: Option<i64>,
    pub commission_percentage: f64,
    /// Commission owed to the worker, minor units
    pub worker_earning: i64,
    /// Payment model label used at creation
    pub payment_type: String,
    /// Client paid the salon (not: worker paid out)
    pub is_paid: bool,
    pub payment_method: Option<String>,
    pub paid_at: Option<i64>,
    pub invoice_id: Option<i64>,
    /// Business-day of the service (YYYY-MM-DD)
    pub service_date: String,
    pub created_at: i64,
}

/// Where a completion event came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    Appointment,
    WalkIn,
}

impl CompletionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::WalkIn => "walk_in",
        }
    }
}

/// Service completion payload
///
/// Used by both `POST /api/appointments/{id}/complete` and `POST /api/walk-ins`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCompletion {
    pub worker_id: i64,
    pub service_id: i64,
    pub service_name: Option<String>,
    /// Price charged, minor units
    pub service_price: i64,
    pub original_price: Option<i64>,
    pub final_price: Option<i64>,
    /// Client paid at completion
    #[serde(default)]
    pub client_paid: bool,
    pub payment_method: Option<String>,
}

/// Result of recording a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub appointment_id: i64,
    /// None when the worker's payment model produces no per-service earning
    pub earning: Option<Earning>,
    /// Wallet was credited by this call
    pub wallet_credited: bool,
    /// The event was already recorded earlier
    pub duplicate: bool,
}

/// Earnings list filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EarningStatusFilter {
    /// Client has not paid yet
    Unpaid,
    /// Paid by client, not yet invoiced
    Available,
    Invoiced,
    #[default]
    All,
}

/// Earnings list query (`GET /api/earnings`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningQuery {
    pub worker_id: Option<i64>,
    #[serde(default)]
    pub status: EarningStatusFilter,
    /// Inclusive, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive, YYYY-MM-DD
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningList {
    pub earnings: Vec<Earning>,
    pub count: usize,
    /// Sum of `worker_earning`
    pub total_earning: i64,
}

/// Deferred client payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkEarningPaid {
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_defaults() {
        let c: ServiceCompletion = serde_json::from_str(
            r#"{"worker_id":1,"service_id":2,"service_price":20000}"#,
        )
        .unwrap();
        assert!(!c.client_paid);
        assert!(c.service_name.is_none());
    }

    #[test]
    fn test_status_filter_parse() {
        let q: EarningQuery = serde_json::from_str(r#"{"status":"available"}"#).unwrap();
        assert_eq!(q.status, EarningStatusFilter::Available);
        let q: EarningQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.status, EarningStatusFilter::All);
    }

    #[test]
    fn test_mark_paid_default_method() {
        let m: MarkEarningPaid = serde_json::from_str("{}").unwrap();
        assert_eq!(m.payment_method, "cash");
    }
}
