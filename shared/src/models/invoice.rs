//! Invoice Model (结算单)

use serde::{Deserialize, Serialize};

/// Invoice status; payouts are recorded at the moment cash is handed over
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum InvoiceStatus {
    Paid,
}

/// Immutable payout record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i64,
    pub salon_id: i64,
    pub worker_id: i64,
    /// `INV-000001`
    pub invoice_number: String,
    pub sequence: i64,
    /// YYYY-MM-DD
    pub period_start: String,
    /// YYYY-MM-DD
    pub period_end: String,
    /// Sum of included earnings
    pub total_earnings: i64,
    /// Advances netted against this payout
    pub advance_deduction: i64,
    /// Outstanding advances absorbed beyond the earnings
    pub advance_write_off: i64,
    /// Cash paid out: `total_earnings - advance_deduction`
    pub total_amount: i64,
    pub appointments_count: i64,
    pub status: InvoiceStatus,
    pub paid_date: i64,
    pub payment_method: String,
    pub notes: Option<String>,
    pub generated_by: i64,
    pub created_at: i64,
}

/// Denormalised copy of one settled earning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub id: i64,
    pub invoice_id: i64,
    pub earning_id: i64,
    pub appointment_id: i64,
    pub service_name: Option<String>,
    pub service_price: i64,
    pub commission_percentage: f64,
    pub worker_earning: i64,
    pub service_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
}

/// Generate invoice payload
///
/// Omitting both period bounds pays out everything available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub worker_id: i64,
    /// Inclusive, YYYY-MM-DD
    pub period_start: Option<String>,
    /// Inclusive, YYYY-MM-DD
    pub period_end: Option<String>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    pub notes: Option<String>,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

/// Invoice list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceQuery {
    pub worker_id: Option<i64>,
    pub limit: Option<i64>,
}
