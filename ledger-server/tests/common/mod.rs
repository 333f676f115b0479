//! Shared fixtures: a migrated SQLite file in a temp dir plus one salon.

#![allow(dead_code)]

use chrono_tz::Tz;
use ledger_server::db::repository::worker::{self, NewWorker};
use ledger_server::db::repository::salon;
use ledger_server::{DbService, Ledger};
use shared::models::{PaymentType, ServiceCompletion, Worker};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const OWNER_ID: i64 = 1_000;

pub struct TestEnv {
    _dir: TempDir,
    pub db_path: String,
    pub pool: SqlitePool,
    pub ledger: Ledger,
    pub salon_id: i64,
}

pub async fn setup() -> TestEnv {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("ledger.db").to_string_lossy().into_owned();
    let db = DbService::new(&db_path).await.expect("open database");
    let salon = salon::create(&db.pool, "Test Salon", OWNER_ID)
        .await
        .expect("create salon");
    TestEnv {
        _dir: dir,
        db_path,
        ledger: Ledger::new(db.pool.clone(), Tz::UTC),
        pool: db.pool,
        salon_id: salon.id,
    }
}

impl TestEnv {
    pub async fn add_salon(&self, owner_id: i64) -> i64 {
        salon::create(&self.pool, "Other Salon", owner_id)
            .await
            .expect("create salon")
            .id
    }

    pub async fn add_worker(
        &self,
        salon_id: i64,
        payment_type: Option<PaymentType>,
        commission_percentage: Option<f64>,
        user_id: Option<i64>,
    ) -> Worker {
        worker::create(
            &self.pool,
            NewWorker {
                salon_id,
                user_id,
                name: "Ana".to_string(),
                payment_type,
                commission_percentage,
                base_salary: None,
            },
        )
        .await
        .expect("create worker")
    }

    /// Worker on a plain percentage commission in the default salon
    pub async fn commission_worker(&self, percentage: f64) -> Worker {
        self.add_worker(
            self.salon_id,
            Some(PaymentType::PercentageCommission),
            Some(percentage),
            None,
        )
        .await
    }

    /// Sum of worker_earning over paid, not invoiced earnings
    pub async fn available_earnings(&self, worker_id: i64) -> i64 {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(worker_earning), 0) FROM earning WHERE worker_id = ? AND is_paid = 1 AND invoice_id IS NULL",
        )
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await
        .expect("sum earnings")
    }
}

pub fn completion(worker_id: i64, service_id: i64, price: i64, client_paid: bool) -> ServiceCompletion {
    ServiceCompletion {
        worker_id,
        service_id,
        service_name: Some(format!("Service {service_id}")),
        service_price: price,
        original_price: None,
        final_price: None,
        client_paid,
        payment_method: client_paid.then(|| "cash".to_string()),
    }
}

pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
