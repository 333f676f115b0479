//! Worker Earnings & Wallet Ledger
//!
//! # 模块结构
//!
//! ```text
//! ledger/
//! ├── commission.rs  # pure commission calculator
//! ├── money.rs       # Decimal-backed cent arithmetic
//! ├── locks.rs       # per-worker exclusion
//! ├── recorder.rs    # service completion → earning (+ wallet credit)
//! ├── advances.rs    # cash advances
//! ├── wallet.rs      # wallet snapshot & settings
//! ├── invoice.rs     # payout settlement
//! └── reconcile.rs   # wallet repair from source records
//! ```
//!
//! # Transactions
//!
//! Multi-statement operations open a transaction whose first statement is a
//! write. SQLite then grants the write lock up front (waiting up to
//! `busy_timeout`), so the reads that follow see a stable view and no other
//! connection can commit in between.

pub mod advances;
pub mod commission;
pub mod invoice;
pub mod locks;
pub mod money;
pub mod reconcile;
pub mod recorder;
pub mod wallet;

use std::sync::Arc;

use chrono_tz::Tz;
use shared::models::Worker;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::repository::{RepoError, worker};
use crate::utils::{AppError, AppResult, ErrorCode};

pub use commission::{Commission, compute_earning};
pub use locks::WorkerLocks;
pub use recorder::CompletionEvent;

/// Ledger service: owns the pool handle, the worker locks and the business timezone
#[derive(Clone)]
pub struct Ledger {
    pool: SqlitePool,
    locks: Arc<WorkerLocks>,
    tz: Tz,
}

impl Ledger {
    pub fn new(pool: SqlitePool, tz: Tz) -> Self {
        Self {
            pool,
            locks: Arc::new(WorkerLocks::new()),
            tz,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Open a transaction; callers must make the first statement a write
    pub(crate) async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::from(RepoError::from(e)))
    }

    /// Load a worker of the given salon.
    ///
    /// A worker of another salon is a permission error, not a missing one.
    pub async fn load_worker(&self, salon_id: i64, worker_id: i64) -> AppResult<Worker> {
        let worker = worker::find_by_id(&self.pool, worker_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::WorkerNotFound,
                    format!("Worker {} not found", worker_id),
                )
            })?;
        if worker.salon_id != salon_id {
            tracing::warn!(worker_id, salon_id, "Cross-tenant worker access rejected");
            return Err(AppError::permission_denied(format!(
                "Worker {} does not belong to this salon",
                worker_id
            )));
        }
        Ok(worker)
    }
}

pub(crate) async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::from(RepoError::from(e)))
}
