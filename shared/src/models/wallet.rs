//! Wallet Model (技师钱包)

use serde::{Deserialize, Serialize};

/// Preferred payout cadence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentSchedule {
    Weekly,
    Biweekly,
    Monthly,
    #[default]
    OnDemand,
}

/// Per-worker rollup, a cache over earnings, advances and invoices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Wallet {
    pub id: i64,
    pub salon_id: i64,
    pub worker_id: i64,
    /// Paid, not yet invoiced earnings (gross of advances)
    pub balance: i64,
    /// Lifetime service price of paid earnings
    pub total_earned: i64,
    /// Lifetime payouts
    pub total_paid: i64,
    pub total_advances: i64,
    pub outstanding_advances: i64,
    pub advance_limit: Option<i64>,
    pub payment_schedule: PaymentSchedule,
    pub last_payout_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Wallet {
    /// Balance net of outstanding advances; negative when the worker owes the salon
    pub fn net_balance(&self) -> i64 {
        self.balance - self.outstanding_advances
    }
}

/// Wallet view returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub worker_id: i64,
    pub balance: i64,
    pub total_earned: i64,
    pub total_paid: i64,
    pub total_advances: i64,
    pub outstanding_advances: i64,
    pub net_balance: i64,
    pub this_month_paid_out: i64,
    pub advance_limit: Option<i64>,
    pub payment_schedule: PaymentSchedule,
    pub last_payout_date: Option<i64>,
}

impl WalletSnapshot {
    pub fn new(wallet: &Wallet, this_month_paid_out: i64) -> Self {
        Self {
            worker_id: wallet.worker_id,
            balance: wallet.balance,
            total_earned: wallet.total_earned,
            total_paid: wallet.total_paid,
            total_advances: wallet.total_advances,
            outstanding_advances: wallet.outstanding_advances,
            net_balance: wallet.net_balance(),
            this_month_paid_out,
            advance_limit: wallet.advance_limit,
            payment_schedule: wallet.payment_schedule,
            last_payout_date: wallet.last_payout_date,
        }
    }
}

/// Wallet settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletSettingsUpdate {
    pub advance_limit: Option<i64>,
    /// Remove the advance limit (takes precedence over `advance_limit`)
    #[serde(default)]
    pub clear_advance_limit: bool,
    pub payment_schedule: Option<PaymentSchedule>,
}

/// Reconciliation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub old_balance: i64,
    pub new_balance: i64,
    /// `new_balance - old_balance`
    pub difference: i64,
    pub wallet: Wallet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(balance: i64, outstanding: i64) -> Wallet {
        Wallet {
            id: 1,
            salon_id: 1,
            worker_id: 1,
            balance,
            total_earned: 0,
            total_paid: 0,
            total_advances: outstanding,
            outstanding_advances: outstanding,
            advance_limit: None,
            payment_schedule: PaymentSchedule::default(),
            last_payout_date: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_net_balance_can_go_negative() {
        assert_eq!(wallet(10_000, 3_000).net_balance(), 7_000);
        assert_eq!(wallet(1_000, 3_000).net_balance(), -2_000);
    }

    #[test]
    fn test_schedule_serde() {
        assert_eq!(
            serde_json::to_string(&PaymentSchedule::OnDemand).unwrap(),
            "\"on_demand\""
        );
        let s: PaymentSchedule = serde_json::from_str("\"biweekly\"").unwrap();
        assert_eq!(s, PaymentSchedule::Biweekly);
    }
}
