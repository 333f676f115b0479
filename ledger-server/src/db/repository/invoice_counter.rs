//! Tenant-scoped invoice sequence
//!
//! One row per salon. The increment is a single upsert, so it is atomic across
//! connections and rolls back together with the surrounding transaction.

use super::RepoResult;
use sqlx::SqliteConnection;

/// Allocate the next invoice sequence for a salon (starts at 1)
pub async fn next_value(conn: &mut SqliteConnection, salon_id: i64) -> RepoResult<i64> {
    let value: i64 = sqlx::query_scalar(
        "INSERT INTO invoice_counter (salon_id, last_value) VALUES (?, 1) \
         ON CONFLICT(salon_id) DO UPDATE SET last_value = last_value + 1 \
         RETURNING last_value",
    )
    .bind(salon_id)
    .fetch_one(conn)
    .await?;
    Ok(value)
}

/// Render a sequence as an invoice number
pub fn format_invoice_number(sequence: i64) -> String {
    format!("INV-{sequence:06}")
}
