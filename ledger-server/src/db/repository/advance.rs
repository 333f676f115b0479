//! Advance Repository

use super::{RepoError, RepoResult};
use shared::models::{Advance, AdvanceStatus};
use sqlx::{SqliteConnection, SqliteExecutor};

const ADVANCE_SELECT: &str = "SELECT id, salon_id, worker_id, amount, reason, status, given_by, given_at, deducted_at, invoice_id FROM advance";

pub async fn insert(conn: &mut SqliteConnection, a: &Advance) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO advance (id, salon_id, worker_id, amount, reason, status, given_by, given_at, deducted_at, invoice_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(a.id)
    .bind(a.salon_id)
    .bind(a.worker_id)
    .bind(a.amount)
    .bind(&a.reason)
    .bind(a.status)
    .bind(a.given_by)
    .bind(a.given_at)
    .bind(a.deducted_at)
    .bind(a.invoice_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Advance>> {
    let advance = sqlx::query_as::<_, Advance>(&format!("{ADVANCE_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(advance)
}

/// Advances of a worker, newest first
pub async fn find_by_worker(
    executor: impl SqliteExecutor<'_>,
    salon_id: i64,
    worker_id: i64,
    status: Option<AdvanceStatus>,
) -> RepoResult<Vec<Advance>> {
    let advances = sqlx::query_as::<_, Advance>(&format!(
        "{ADVANCE_SELECT} WHERE salon_id = ?1 AND worker_id = ?2 AND (?3 IS NULL OR status = ?3) ORDER BY given_at DESC"
    ))
    .bind(salon_id)
    .bind(worker_id)
    .bind(status)
    .fetch_all(executor)
    .await?;
    Ok(advances)
}

/// Outstanding (`approved`) advances, oldest first
pub async fn find_outstanding(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
) -> RepoResult<Vec<Advance>> {
    let advances = sqlx::query_as::<_, Advance>(&format!(
        "{ADVANCE_SELECT} WHERE salon_id = ? AND worker_id = ? AND status = 'approved' ORDER BY given_at"
    ))
    .bind(salon_id)
    .bind(worker_id)
    .fetch_all(conn)
    .await?;
    Ok(advances)
}

/// Transition an approved advance to `deducted`; happens exactly once
pub async fn mark_deducted(
    conn: &mut SqliteConnection,
    id: i64,
    invoice_id: i64,
    deducted_at: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE advance SET status = 'deducted', deducted_at = ?, invoice_id = ? WHERE id = ? AND status = 'approved'",
    )
    .bind(deducted_at)
    .bind(invoice_id)
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() != 1 {
        return Err(RepoError::Database(format!(
            "Advance {id} is no longer outstanding"
        )));
    }
    Ok(())
}

/// Source-of-truth sums for wallet reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct AdvanceTotals {
    /// Sum over all advances
    pub total_given: i64,
    /// Sum over `approved` advances
    pub outstanding: i64,
}

pub async fn totals(
    executor: impl SqliteExecutor<'_>,
    salon_id: i64,
    worker_id: i64,
) -> RepoResult<AdvanceTotals> {
    let totals = sqlx::query_as::<_, AdvanceTotals>(
        "SELECT \
           COALESCE(SUM(amount), 0) AS total_given, \
           COALESCE(SUM(CASE WHEN status = 'approved' THEN amount ELSE 0 END), 0) AS outstanding \
         FROM advance WHERE salon_id = ? AND worker_id = ?",
    )
    .bind(salon_id)
    .bind(worker_id)
    .fetch_one(executor)
    .await?;
    Ok(totals)
}
