//! Earning Repository

use super::{RepoError, RepoResult};
use shared::models::{Earning, EarningStatusFilter};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor};

const EARNING_COLUMNS: &str = "id, salon_id, worker_id, appointment_id, service_id, service_name, service_price, original_price, final_price, commission_percentage, worker_earning, payment_type, is_paid, payment_method, paid_at, invoice_id, service_date, created_at";

/// Counts explaining why no earning is payable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct PayoutDiagnostics {
    /// Earnings the client has paid for
    pub total_paid: i64,
    /// Paid earnings already settled into an invoice
    pub already_invoiced: i64,
    /// Earnings still waiting for the client to pay
    pub unpaid_by_client: i64,
    /// Paid and not yet invoiced
    pub available: i64,
}

/// Filters for [`list`]
#[derive(Debug, Clone, Default)]
pub struct EarningFilter<'a> {
    pub worker_id: Option<i64>,
    pub status: EarningStatusFilter,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Earning>> {
    let earning = sqlx::query_as::<_, Earning>(&format!(
        "SELECT {EARNING_COLUMNS} FROM earning WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(earning)
}

/// Existing earning for a completion event (appointment + service)
pub async fn find_by_completion(
    executor: impl SqliteExecutor<'_>,
    appointment_id: i64,
    service_id: i64,
) -> RepoResult<Option<Earning>> {
    let earning = sqlx::query_as::<_, Earning>(&format!(
        "SELECT {EARNING_COLUMNS} FROM earning WHERE appointment_id = ? AND service_id = ?"
    ))
    .bind(appointment_id)
    .bind(service_id)
    .fetch_optional(executor)
    .await?;
    Ok(earning)
}

pub async fn insert(conn: &mut SqliteConnection, e: &Earning) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO earning ({EARNING_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(e.id)
    .bind(e.salon_id)
    .bind(e.worker_id)
    .bind(e.appointment_id)
    .bind(e.service_id)
    .bind(&e.service_name)
    .bind(e.service_price)
    .bind(e.original_price)
    .bind(e.final_price)
    .bind(e.commission_percentage)
    .bind(e.worker_earning)
    .bind(&e.payment_type)
    .bind(e.is_paid)
    .bind(&e.payment_method)
    .bind(e.paid_at)
    .bind(e.invoice_id)
    .bind(&e.service_date)
    .bind(e.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Flip `is_paid` on an unpaid earning. Returns false when it was already paid.
pub async fn mark_paid(
    conn: &mut SqliteConnection,
    id: i64,
    payment_method: &str,
    paid_at: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE earning SET is_paid = 1, payment_method = ?, paid_at = ? WHERE id = ? AND is_paid = 0",
    )
    .bind(payment_method)
    .bind(paid_at)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Paid, not yet invoiced earnings of a worker, optionally bounded by service date (inclusive)
pub async fn find_payable(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> RepoResult<Vec<Earning>> {
    let earnings = sqlx::query_as::<_, Earning>(&format!(
        "SELECT {EARNING_COLUMNS} FROM earning \
         WHERE salon_id = ?1 AND worker_id = ?2 AND is_paid = 1 AND invoice_id IS NULL \
           AND (?3 IS NULL OR service_date >= ?3) AND (?4 IS NULL OR service_date <= ?4) \
         ORDER BY service_date, created_at"
    ))
    .bind(salon_id)
    .bind(worker_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(conn)
    .await?;
    Ok(earnings)
}

pub async fn payout_diagnostics(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
) -> RepoResult<PayoutDiagnostics> {
    let diagnostics = sqlx::query_as::<_, PayoutDiagnostics>(
        "SELECT \
           COALESCE(SUM(CASE WHEN is_paid = 1 THEN 1 ELSE 0 END), 0) AS total_paid, \
           COALESCE(SUM(CASE WHEN is_paid = 1 AND invoice_id IS NOT NULL THEN 1 ELSE 0 END), 0) AS already_invoiced, \
           COALESCE(SUM(CASE WHEN is_paid = 0 THEN 1 ELSE 0 END), 0) AS unpaid_by_client, \
           COALESCE(SUM(CASE WHEN is_paid = 1 AND invoice_id IS NULL THEN 1 ELSE 0 END), 0) AS available \
         FROM earning WHERE salon_id = ? AND worker_id = ?",
    )
    .bind(salon_id)
    .bind(worker_id)
    .fetch_one(conn)
    .await?;
    Ok(diagnostics)
}

/// Settle one earning into an invoice; fails if it is no longer payable
pub async fn assign_invoice(
    conn: &mut SqliteConnection,
    id: i64,
    invoice_id: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE earning SET invoice_id = ? WHERE id = ? AND is_paid = 1 AND invoice_id IS NULL",
    )
    .bind(invoice_id)
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() != 1 {
        return Err(RepoError::Database(format!(
            "Earning {id} is no longer payable"
        )));
    }
    Ok(())
}

/// Source-of-truth sums for wallet reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct EarningTotals {
    /// Sum of `worker_earning` over paid, not invoiced earnings
    pub available_earning: i64,
    /// Sum of `service_price` over paid earnings. Feeds `total_earned`, which the
    /// write paths only credit once the client has paid, so unpaid earnings are left out.
    pub paid_service_price: i64,
}

pub async fn totals(
    conn: &mut SqliteConnection,
    salon_id: i64,
    worker_id: i64,
) -> RepoResult<EarningTotals> {
    let totals = sqlx::query_as::<_, EarningTotals>(
        "SELECT \
           COALESCE(SUM(CASE WHEN is_paid = 1 AND invoice_id IS NULL THEN worker_earning ELSE 0 END), 0) AS available_earning, \
           COALESCE(SUM(CASE WHEN is_paid = 1 THEN service_price ELSE 0 END), 0) AS paid_service_price \
         FROM earning WHERE salon_id = ? AND worker_id = ?",
    )
    .bind(salon_id)
    .bind(worker_id)
    .fetch_one(conn)
    .await?;
    Ok(totals)
}

pub async fn list(
    executor: impl SqliteExecutor<'_>,
    salon_id: i64,
    filter: &EarningFilter<'_>,
) -> RepoResult<Vec<Earning>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {EARNING_COLUMNS} FROM earning WHERE salon_id = "
    ));
    qb.push_bind(salon_id);

    if let Some(worker_id) = filter.worker_id {
        qb.push(" AND worker_id = ").push_bind(worker_id);
    }
    match filter.status {
        EarningStatusFilter::Unpaid => {
            qb.push(" AND is_paid = 0");
        }
        EarningStatusFilter::Available => {
            qb.push(" AND is_paid = 1 AND invoice_id IS NULL");
        }
        EarningStatusFilter::Invoiced => {
            qb.push(" AND invoice_id IS NOT NULL");
        }
        EarningStatusFilter::All => {}
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND service_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND service_date <= ").push_bind(end);
    }
    qb.push(" ORDER BY service_date DESC, created_at DESC");

    let earnings = qb.build_query_as::<Earning>().fetch_all(executor).await?;
    Ok(earnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Single-connection in-memory pool with only the earning table
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE earning (
                id INTEGER PRIMARY KEY,
                salon_id INTEGER NOT NULL,
                worker_id INTEGER NOT NULL,
                appointment_id INTEGER NOT NULL,
                service_id INTEGER NOT NULL,
                service_name TEXT,
                service_price INTEGER NOT NULL,
                original_price INTEGER,
                final_price INTEGER,
                commission_percentage REAL NOT NULL,
                worker_earning INTEGER NOT NULL,
                payment_type TEXT NOT NULL,
                is_paid INTEGER NOT NULL DEFAULT 0,
                payment_method TEXT,
                paid_at INTEGER,
                invoice_id INTEGER,
                service_date TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE (appointment_id, service_id)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn earning(id: i64, worker_earning: i64, is_paid: bool, invoice_id: Option<i64>, date: &str) -> Earning {
        Earning {
            id,
            salon_id: 1,
            worker_id: 10,
            appointment_id: id * 100,
            service_id: 7,
            service_name: Some("Cut".into()),
            service_price: worker_earning * 2,
            original_price: None,
            final_price: None,
            commission_percentage: 50.0,
            worker_earning,
            payment_type: "percentage_commission".into(),
            is_paid,
            payment_method: None,
            paid_at: None,
            invoice_id,
            service_date: date.into(),
            created_at: id,
        }
    }

    async fn seed(pool: &SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &earning(1, 1000, true, None, "2026-03-01")).await.unwrap();
        insert(&mut conn, &earning(2, 2000, true, None, "2026-03-05")).await.unwrap();
        insert(&mut conn, &earning(3, 4000, false, None, "2026-03-05")).await.unwrap();
        insert(&mut conn, &earning(4, 8000, true, Some(99), "2026-02-20")).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_payable_respects_period() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        let all = find_payable(&mut conn, 1, 10, None, None).await.unwrap();
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);

        let march_5 = find_payable(&mut conn, 1, 10, Some("2026-03-05"), Some("2026-03-05"))
            .await
            .unwrap();
        assert_eq!(march_5.len(), 1);
        assert_eq!(march_5[0].id, 2);
    }

    #[tokio::test]
    async fn test_payout_diagnostics_counts() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        let d = payout_diagnostics(&mut conn, 1, 10).await.unwrap();
        assert_eq!(
            d,
            PayoutDiagnostics {
                total_paid: 3,
                already_invoiced: 1,
                unpaid_by_client: 1,
                available: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_completion_rejected() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        let mut dup = earning(50, 1000, true, None, "2026-03-01");
        dup.appointment_id = 100;
        let err = insert(&mut conn, &dup).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_mark_paid_only_once() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(mark_paid(&mut conn, 3, "card", 5).await.unwrap());
        assert!(!mark_paid(&mut conn, 3, "card", 6).await.unwrap());
        let e = find_by_id(&mut *conn, 3).await.unwrap().unwrap();
        assert!(e.is_paid);
        assert_eq!(e.paid_at, Some(5));
    }

    #[tokio::test]
    async fn test_assign_invoice_never_reassigns() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        assign_invoice(&mut conn, 1, 500).await.unwrap();
        assert!(assign_invoice(&mut conn, 1, 501).await.is_err());
        // unpaid earnings cannot be settled
        assert!(assign_invoice(&mut conn, 3, 500).await.is_err());
        let settled = find_by_id(&mut *conn, 1).await.unwrap().unwrap();
        assert_eq!(settled.invoice_id, Some(500));
    }

    #[tokio::test]
    async fn test_totals_and_list_filters() {
        let pool = test_pool().await;
        seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();

        let t = totals(&mut conn, 1, 10).await.unwrap();
        assert_eq!(t.available_earning, 3000);
        assert_eq!(t.paid_service_price, 2000 + 4000 + 16000);
        drop(conn);

        let unpaid = list(
            &pool,
            1,
            &EarningFilter {
                status: EarningStatusFilter::Unpaid,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].id, 3);

        let march = list(
            &pool,
            1,
            &EarningFilter {
                worker_id: Some(10),
                start_date: Some("2026-03-01"),
                end_date: Some("2026-03-31"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(march.len(), 3);

        let other_salon = list(&pool, 2, &EarningFilter::default()).await.unwrap();
        assert!(other_salon.is_empty());
    }
}
