//! Invoice Repository

use super::RepoResult;
use shared::models::{Invoice, InvoiceLine};
use sqlx::{SqliteConnection, SqliteExecutor};

const INVOICE_COLUMNS: &str = "id, salon_id, worker_id, invoice_number, sequence, period_start, period_end, total_earnings, advance_deduction, advance_write_off, total_amount, appointments_count, status, paid_date, payment_method, notes, generated_by, created_at";

const LINE_COLUMNS: &str = "id, invoice_id, earning_id, appointment_id, service_name, service_price, commission_percentage, worker_earning, service_date";

pub async fn insert(conn: &mut SqliteConnection, inv: &Invoice) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO invoice ({INVOICE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(inv.id)
    .bind(inv.salon_id)
    .bind(inv.worker_id)
    .bind(&inv.invoice_number)
    .bind(inv.sequence)
    .bind(&inv.period_start)
    .bind(&inv.period_end)
    .bind(inv.total_earnings)
    .bind(inv.advance_deduction)
    .bind(inv.advance_write_off)
    .bind(inv.total_amount)
    .bind(inv.appointments_count)
    .bind(inv.status)
    .bind(inv.paid_date)
    .bind(&inv.payment_method)
    .bind(&inv.notes)
    .bind(inv.generated_by)
    .bind(inv.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_line(conn: &mut SqliteConnection, line: &InvoiceLine) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO invoice_line ({LINE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(line.id)
    .bind(line.invoice_id)
    .bind(line.earning_id)
    .bind(line.appointment_id)
    .bind(&line.service_name)
    .bind(line.service_price)
    .bind(line.commission_percentage)
    .bind(line.worker_earning)
    .bind(&line.service_date)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Invoice>> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoice WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(invoice)
}

pub async fn find_lines(executor: impl SqliteExecutor<'_>, invoice_id: i64) -> RepoResult<Vec<InvoiceLine>> {
    let lines = sqlx::query_as::<_, InvoiceLine>(&format!(
        "SELECT {LINE_COLUMNS} FROM invoice_line WHERE invoice_id = ? ORDER BY service_date, id"
    ))
    .bind(invoice_id)
    .fetch_all(executor)
    .await?;
    Ok(lines)
}

/// Invoices of a salon, optionally for one worker, newest first
pub async fn list(
    executor: impl SqliteExecutor<'_>,
    salon_id: i64,
    worker_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<Invoice>> {
    let invoices = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoice WHERE salon_id = ?1 AND (?2 IS NULL OR worker_id = ?2) ORDER BY sequence DESC LIMIT ?3"
    ))
    .bind(salon_id)
    .bind(worker_id)
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(invoices)
}

/// Sum of `total_amount` over paid invoices of a worker, optionally since a timestamp
pub async fn sum_paid(
    executor: impl SqliteExecutor<'_>,
    salon_id: i64,
    worker_id: i64,
    since_millis: Option<i64>,
) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_amount), 0) FROM invoice \
         WHERE salon_id = ?1 AND worker_id = ?2 AND status = 'paid' AND (?3 IS NULL OR paid_date >= ?3)",
    )
    .bind(salon_id)
    .bind(worker_id)
    .bind(since_millis)
    .fetch_one(executor)
    .await?;
    Ok(total)
}
