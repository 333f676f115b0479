//! Wallet Repository
//!
//! Every mutation is a single SQL statement with in-place arithmetic, so
//! concurrent credits to the same wallet never lose an update.

use super::{RepoError, RepoResult};
use shared::models::{PaymentSchedule, Wallet};
use sqlx::{SqliteConnection, SqliteExecutor};

const WALLET_SELECT: &str = "SELECT id, salon_id, worker_id, balance, total_earned, total_paid, total_advances, outstanding_advances, advance_limit, payment_schedule, last_payout_date, created_at, updated_at FROM wallet";

pub async fn find_by_worker(
    executor: impl SqliteExecutor<'_>,
    worker_id: i64,
) -> RepoResult<Option<Wallet>> {
    let wallet = sqlx::query_as::<_, Wallet>(&format!("{WALLET_SELECT} WHERE worker_id = ?"))
        .bind(worker_id)
        .fetch_optional(executor)
        .await?;
    Ok(wallet)
}

/// Create the wallet if absent and bump `updated_at`.
///
/// Used as the first statement of a settlement transaction: it is a write, so
/// SQLite hands this connection the database write lock before any selection.
pub async fn ensure(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO wallet (id, salon_id, worker_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(worker_id) DO UPDATE SET updated_at = excluded.updated_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(salon_id)
    .bind(worker_id)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Load a wallet that must exist (after [`ensure`])
pub async fn get(conn: &mut SqliteConnection, worker_id: i64) -> RepoResult<Wallet> {
    find_by_worker(conn, worker_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Wallet for worker {worker_id}")))
}

/// Atomic credit for a client-paid earning, seeding the wallet when absent
pub async fn credit_earning(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
    worker_earning: i64,
    service_price: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO wallet (id, salon_id, worker_id, balance, total_earned, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(worker_id) DO UPDATE SET \
           balance = balance + excluded.balance, \
           total_earned = total_earned + excluded.total_earned, \
           updated_at = excluded.updated_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(salon_id)
    .bind(worker_id)
    .bind(worker_earning)
    .bind(service_price)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Atomic increment of the advance fields
pub async fn add_advance(
    conn: &mut SqliteConnection,
    worker_id: i64,
    amount: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE wallet SET total_advances = total_advances + ?, outstanding_advances = outstanding_advances + ?, updated_at = ? WHERE worker_id = ?",
    )
    .bind(amount)
    .bind(amount)
    .bind(now)
    .bind(worker_id)
    .execute(conn)
    .await?;
    Ok(())
}

/// Payout settlement: balance and outstanding advances are floored at zero
pub async fn apply_payout(
    conn: &mut SqliteConnection,
    worker_id: i64,
    total_earnings: i64,
    payout_amount: i64,
    advances_settled: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE wallet SET \
           balance = MAX(0, balance - ?1), \
           total_paid = total_paid + ?2, \
           outstanding_advances = MAX(0, outstanding_advances - ?3), \
           last_payout_date = ?4, \
           updated_at = ?4 \
         WHERE worker_id = ?5",
    )
    .bind(total_earnings)
    .bind(payout_amount)
    .bind(advances_settled)
    .bind(now)
    .bind(worker_id)
    .execute(conn)
    .await?;
    if rows.rows_affected() != 1 {
        return Err(RepoError::NotFound(format!("Wallet for worker {worker_id}")));
    }
    Ok(())
}

/// Values recomputed from source records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletTotals {
    pub balance: i64,
    pub total_earned: i64,
    pub total_paid: i64,
    pub total_advances: i64,
    pub outstanding_advances: i64,
}

/// Overwrite the cached rollup (reconciliation)
pub async fn overwrite_totals(
    conn: &mut SqliteConnection,
    worker_id: i64,
    totals: WalletTotals,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE wallet SET balance = ?, total_earned = ?, total_paid = ?, total_advances = ?, outstanding_advances = ?, updated_at = ? WHERE worker_id = ?",
    )
    .bind(totals.balance)
    .bind(totals.total_earned)
    .bind(totals.total_paid)
    .bind(totals.total_advances)
    .bind(totals.outstanding_advances)
    .bind(now)
    .bind(worker_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn update_settings(
    conn: &mut SqliteConnection,
    worker_id: i64,
    advance_limit: Option<Option<i64>>,
    payment_schedule: Option<PaymentSchedule>,
    now: i64,
) -> RepoResult<()> {
    let (set_limit, limit) = match advance_limit {
        Some(limit) => (true, limit),
        None => (false, None),
    };
    sqlx::query(
        "UPDATE wallet SET \
           advance_limit = CASE WHEN ?1 THEN ?2 ELSE advance_limit END, \
           payment_schedule = COALESCE(?3, payment_schedule), \
           updated_at = ?4 \
         WHERE worker_id = ?5",
    )
    .bind(set_limit)
    .bind(limit)
    .bind(payment_schedule)
    .bind(now)
    .bind(worker_id)
    .execute(conn)
    .await?;
    Ok(())
}
