//! Advance Ledger
//!
//! Advances are tracked beside the balance, never subtracted from it; they are
//! netted only at invoice time or in the derived `net_balance`.

use shared::models::{Advance, AdvanceCreate, AdvanceList, AdvanceStatus};

use super::{Ledger, commit, money};
use crate::db::repository::{advance, wallet};
use crate::utils::validation::{MAX_NOTE_LEN, validate_positive_amount, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Whether `outstanding + amount` goes past `limit`; an overflowing sum always does
fn exceeds_limit(outstanding: i64, amount: i64, limit: i64) -> bool {
    outstanding
        .checked_add(amount)
        .is_none_or(|total| total > limit)
}

impl Ledger {
    /// Hand cash to a worker ahead of earnings
    pub async fn give_advance(
        &self,
        salon_id: i64,
        worker_id: i64,
        data: AdvanceCreate,
        given_by: i64,
    ) -> AppResult<Advance> {
        validate_positive_amount(data.amount, "amount")?;
        if data.amount > money::MAX_ADVANCE_AMOUNT {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!(
                    "amount exceeds maximum allowed ({}), got {}",
                    money::MAX_ADVANCE_AMOUNT,
                    data.amount
                ),
            ));
        }
        validate_required_text(&data.reason, "reason", MAX_NOTE_LEN)?;

        let worker = self.load_worker(salon_id, worker_id).await?;
        if !worker.is_active {
            return Err(AppError::with_message(
                ErrorCode::WorkerInactive,
                format!("Worker {} is inactive", worker_id),
            ));
        }

        let _guard = self.locks.acquire(salon_id, worker_id).await;
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;
        wallet::ensure(&mut tx, salon_id, worker_id, now).await?;
        let current = wallet::get(&mut tx, worker_id).await?;

        if let Some(limit) = current.advance_limit
            && exceeds_limit(current.outstanding_advances, data.amount, limit)
        {
            tracing::warn!(
                worker_id,
                outstanding = current.outstanding_advances,
                requested = data.amount,
                limit,
                "Advance limit exceeded"
            );
            return Err(AppError::with_message(
                ErrorCode::AdvanceLimitExceeded,
                format!(
                    "Advance of {} would exceed the limit of {} (outstanding {})",
                    money::format_amount(data.amount),
                    money::format_amount(limit),
                    money::format_amount(current.outstanding_advances)
                ),
            )
            .with_detail("outstanding", current.outstanding_advances)
            .with_detail("requested", data.amount)
            .with_detail("limit", limit));
        }

        let record = Advance {
            id: shared::util::snowflake_id(),
            salon_id,
            worker_id,
            amount: data.amount,
            reason: data.reason.trim().to_string(),
            status: AdvanceStatus::Approved,
            given_by,
            given_at: now,
            deducted_at: None,
            invoice_id: None,
        };
        advance::insert(&mut tx, &record).await?;
        wallet::add_advance(&mut tx, worker_id, record.amount, now).await?;
        commit(tx).await?;

        tracing::info!(
            advance_id = record.id,
            worker_id,
            salon_id,
            amount = record.amount,
            given_by,
            "Advance given"
        );
        Ok(record)
    }

    /// Advances of a worker with outstanding / given totals
    pub async fn list_advances(
        &self,
        salon_id: i64,
        worker_id: i64,
        status: Option<AdvanceStatus>,
    ) -> AppResult<AdvanceList> {
        self.load_worker(salon_id, worker_id).await?;
        let advances = advance::find_by_worker(&self.pool, salon_id, worker_id, status).await?;
        let totals = advance::totals(&self.pool, salon_id, worker_id).await?;
        Ok(AdvanceList {
            advances,
            total_outstanding: totals.outstanding,
            total_given: totals.total_given,
        })
    }

    /// Single advance of a salon
    pub async fn find_advance(&self, salon_id: i64, advance_id: i64) -> AppResult<Advance> {
        match advance::find_by_id(&self.pool, advance_id).await? {
            Some(a) if a.salon_id == salon_id => Ok(a),
            _ => Err(AppError::with_message(
                ErrorCode::AdvanceNotFound,
                format!("Advance {} not found", advance_id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_limit() {
        assert!(!exceeds_limit(100, 900, 1_000));
        assert!(exceeds_limit(100, 901, 1_000));
        assert!(!exceeds_limit(0, 0, 0));
    }

    #[test]
    fn test_exceeds_limit_near_i64_max() {
        assert!(exceeds_limit(100, i64::MAX, 10_000));
        assert!(exceeds_limit(i64::MAX, 1, i64::MAX));
        assert!(!exceeds_limit(i64::MAX - 1, 1, i64::MAX));
    }
}
