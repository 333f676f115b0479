//! Worker Repository

use super::RepoResult;
use shared::models::{PaymentType, Worker};
use sqlx::{SqliteExecutor, SqlitePool};

const WORKER_SELECT: &str = "SELECT id, salon_id, user_id, name, payment_type, commission_percentage, base_salary, is_active, created_at FROM worker";

/// New worker row (worker management itself lives outside the ledger)
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub salon_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub payment_type: Option<PaymentType>,
    pub commission_percentage: Option<f64>,
    pub base_salary: Option<i64>,
}

pub async fn create(pool: &SqlitePool, data: NewWorker) -> RepoResult<Worker> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO worker (id, salon_id, user_id, name, payment_type, commission_percentage, base_salary, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(data.salon_id)
    .bind(data.user_id)
    .bind(&data.name)
    .bind(data.payment_type)
    .bind(data.commission_percentage)
    .bind(data.base_salary)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Worker {
        id,
        salon_id: data.salon_id,
        user_id: data.user_id,
        name: data.name,
        payment_type: data.payment_type,
        commission_percentage: data.commission_percentage,
        base_salary: data.base_salary,
        is_active: true,
        created_at: now,
    })
}

pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Worker>> {
    let worker = sqlx::query_as::<_, Worker>(&format!("{WORKER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(worker)
}

pub async fn find_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Worker>> {
    let worker = sqlx::query_as::<_, Worker>(&format!("{WORKER_SELECT} WHERE user_id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(worker)
}

/// Change the payment model; existing earnings keep the commission they were created with
pub async fn update_payment_model(
    pool: &SqlitePool,
    id: i64,
    payment_type: Option<PaymentType>,
    commission_percentage: Option<f64>,
    base_salary: Option<i64>,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE worker SET payment_type = ?, commission_percentage = ?, base_salary = ? WHERE id = ?",
    )
    .bind(payment_type)
    .bind(commission_percentage)
    .bind(base_salary)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    sqlx::query("UPDATE worker SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
