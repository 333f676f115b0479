//! Wallet snapshot & settings

use shared::models::{Wallet, WalletSettingsUpdate, WalletSnapshot};

use super::{Ledger, commit};
use crate::db::repository::{invoice, wallet};
use crate::utils::AppResult;
use crate::utils::time;
use crate::utils::validation::validate_non_negative_amount;

impl Ledger {
    /// Wallet view of a worker; the wallet is created on first read
    pub async fn wallet_snapshot(&self, salon_id: i64, worker_id: i64) -> AppResult<WalletSnapshot> {
        self.load_worker(salon_id, worker_id).await?;
        let current = self.ensure_wallet(salon_id, worker_id).await?;
        self.snapshot_of(&current).await
    }

    pub async fn update_wallet_settings(
        &self,
        salon_id: i64,
        worker_id: i64,
        data: WalletSettingsUpdate,
    ) -> AppResult<WalletSnapshot> {
        if let Some(limit) = data.advance_limit {
            validate_non_negative_amount(limit, "advance_limit")?;
        }
        self.load_worker(salon_id, worker_id).await?;

        let advance_limit = if data.clear_advance_limit {
            Some(None)
        } else {
            data.advance_limit.map(Some)
        };

        let _guard = self.locks.acquire(salon_id, worker_id).await;
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;
        wallet::ensure(&mut tx, salon_id, worker_id, now).await?;
        wallet::update_settings(&mut tx, worker_id, advance_limit, data.payment_schedule, now)
            .await?;
        let updated = wallet::get(&mut tx, worker_id).await?;
        commit(tx).await?;

        tracing::info!(
            worker_id,
            advance_limit = ?updated.advance_limit,
            payment_schedule = ?updated.payment_schedule,
            "Wallet settings updated"
        );
        self.snapshot_of(&updated).await
    }

    async fn ensure_wallet(&self, salon_id: i64, worker_id: i64) -> AppResult<Wallet> {
        if let Some(existing) = wallet::find_by_worker(&self.pool, worker_id).await? {
            return Ok(existing);
        }
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;
        wallet::ensure(&mut tx, salon_id, worker_id, now).await?;
        let created = wallet::get(&mut tx, worker_id).await?;
        commit(tx).await?;
        tracing::debug!(worker_id, salon_id, "Wallet created on first read");
        Ok(created)
    }

    async fn snapshot_of(&self, current: &Wallet) -> AppResult<WalletSnapshot> {
        let month_start = time::month_start_millis(shared::util::now_millis(), self.tz);
        let this_month_paid_out =
            invoice::sum_paid(&self.pool, current.salon_id, current.worker_id, Some(month_start))
                .await?;
        Ok(WalletSnapshot::new(current, this_month_paid_out))
    }
}
