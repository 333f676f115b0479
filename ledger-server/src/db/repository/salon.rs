//! Salon Repository

use super::RepoResult;
use shared::models::Salon;
use sqlx::SqlitePool;

const SALON_SELECT: &str = "SELECT id, name, owner_id, created_at FROM salon";

pub async fn create(pool: &SqlitePool, name: &str, owner_id: i64) -> RepoResult<Salon> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO salon (id, name, owner_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(owner_id)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(Salon {
        id,
        name: name.to_string(),
        owner_id,
        created_at: now,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Salon>> {
    let salon = sqlx::query_as::<_, Salon>(&format!("{SALON_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(salon)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Option<Salon>> {
    let salon = sqlx::query_as::<_, Salon>(&format!("{SALON_SELECT} WHERE owner_id = ?"))
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(salon)
}
