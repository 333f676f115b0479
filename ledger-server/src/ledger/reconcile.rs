//! Wallet reconciliation
//!
//! Read-derive-overwrite on the wallet only. Earning, advance and invoice
//! records are never touched.

use shared::models::ReconcileReport;

use super::{Ledger, commit};
use crate::db::repository::wallet::{self, WalletTotals};
use crate::db::repository::{advance, earning, invoice};
use crate::utils::AppResult;

impl Ledger {
    /// Recompute a worker's wallet from source records
    pub async fn recalculate_wallet(&self, salon_id: i64, worker_id: i64) -> AppResult<ReconcileReport> {
        self.load_worker(salon_id, worker_id).await?;

        let _guard = self.locks.acquire(salon_id, worker_id).await;
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;
        wallet::ensure(&mut tx, salon_id, worker_id, now).await?;
        let before = wallet::get(&mut tx, worker_id).await?;

        let earnings = earning::totals(&mut tx, salon_id, worker_id).await?;
        let advances = advance::totals(&mut *tx, salon_id, worker_id).await?;
        let total_paid = invoice::sum_paid(&mut *tx, salon_id, worker_id, None).await?;

        let totals = WalletTotals {
            balance: earnings.available_earning,
            total_earned: earnings.paid_service_price,
            total_paid,
            total_advances: advances.total_given,
            outstanding_advances: advances.outstanding,
        };
        wallet::overwrite_totals(&mut tx, worker_id, totals, now).await?;
        let after = wallet::get(&mut tx, worker_id).await?;
        commit(tx).await?;

        let difference = after.balance - before.balance;
        if difference != 0 || before.outstanding_advances != after.outstanding_advances {
            tracing::warn!(
                worker_id,
                salon_id,
                old_balance = before.balance,
                new_balance = after.balance,
                old_outstanding = before.outstanding_advances,
                new_outstanding = after.outstanding_advances,
                "Wallet drift corrected"
            );
        } else {
            tracing::info!(worker_id, salon_id, balance = after.balance, "Wallet reconciled");
        }

        Ok(ReconcileReport {
            old_balance: before.balance,
            new_balance: after.balance,
            difference,
            wallet: after,
        })
    }
}
