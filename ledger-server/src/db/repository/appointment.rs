//! Appointment mirror Repository
//!
//! The appointment subsystem owns scheduling; the ledger only keeps the
//! completion status and the client payment fields in sync.

use super::RepoResult;
use serde::Serialize;
use sqlx::{SqliteConnection, SqliteExecutor};

pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const PAYMENT_PAID: &str = "PAID";
pub const PAYMENT_UNPAID: &str = "UNPAID";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub salon_id: i64,
    pub worker_id: i64,
    pub status: String,
    pub is_walk_in: bool,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<i64>,
    pub completed_at: Option<i64>,
}

/// Client payment captured at completion
#[derive(Debug, Clone, Copy)]
pub struct PaymentStamp<'a> {
    pub method: Option<&'a str>,
    pub paid_at: i64,
}

/// Mark an appointment completed, inserting the mirror row when absent
/// (walk-ins, or appointments not yet mirrored).
pub async fn mark_completed(
    conn: &mut SqliteConnection,
    id: i64,
    salon_id: i64,
    worker_id: i64,
    is_walk_in: bool,
    payment: Option<PaymentStamp<'_>>,
    now: i64,
) -> RepoResult<()> {
    let (payment_status, method, paid_at) = match payment {
        Some(p) => (PAYMENT_PAID, p.method, Some(p.paid_at)),
        None => (PAYMENT_UNPAID, None, None),
    };
    sqlx::query(
        "INSERT INTO appointment (id, salon_id, worker_id, status, is_walk_in, payment_status, payment_method, paid_at, completed_at, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9, ?9) \
         ON CONFLICT(id) DO UPDATE SET status = excluded.status, \
           payment_status = CASE WHEN appointment.payment_status = 'PAID' THEN appointment.payment_status ELSE excluded.payment_status END, \
           payment_method = COALESCE(appointment.payment_method, excluded.payment_method), \
           paid_at = COALESCE(appointment.paid_at, excluded.paid_at), \
           completed_at = COALESCE(appointment.completed_at, excluded.completed_at), \
           updated_at = excluded.updated_at",
    )
    .bind(id)
    .bind(salon_id)
    .bind(worker_id)
    .bind(STATUS_COMPLETED)
    .bind(is_walk_in)
    .bind(payment_status)
    .bind(method)
    .bind(paid_at)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Record a deferred client payment
pub async fn mark_paid(
    conn: &mut SqliteConnection,
    id: i64,
    payment_method: &str,
    paid_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE appointment SET payment_status = ?, payment_method = ?, paid_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(PAYMENT_PAID)
    .bind(payment_method)
    .bind(paid_at)
    .bind(paid_at)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Appointment>> {
    let appointment = sqlx::query_as::<_, Appointment>(
        "SELECT id, salon_id, worker_id, status, is_walk_in, payment_status, payment_method, paid_at, completed_at FROM appointment WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(appointment)
}
