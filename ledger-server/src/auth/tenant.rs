//! Tenant resolution
//!
//! Maps an authenticated caller to the salon it acts for. Owners resolve
//! through `salon.owner_id`, workers through `worker.user_id`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{CurrentUser, Role};
use crate::db::repository::{salon, worker};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Salon (and, for worker callers, the worker record) behind a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenant {
    pub salon_id: i64,
    /// Set when the caller is a worker
    pub worker_id: Option<i64>,
}

#[async_trait]
pub trait TenantResolver: Send + Sync {
    async fn find_tenant_for_caller(&self, user: &CurrentUser) -> AppResult<Tenant>;
}

/// Resolver backed by the `salon` and `worker` tables
#[derive(Debug, Clone)]
pub struct SqlTenantResolver {
    pool: SqlitePool,
}

impl SqlTenantResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn tenant_not_found(user: &CurrentUser) -> AppError {
    AppError::with_message(
        ErrorCode::TenantNotFound,
        format!("No salon found for {} {}", user.role.as_str(), user.id),
    )
}

#[async_trait]
impl TenantResolver for SqlTenantResolver {
    async fn find_tenant_for_caller(&self, user: &CurrentUser) -> AppResult<Tenant> {
        match user.role {
            Role::Owner => {
                let found = salon::find_by_owner(&self.pool, user.id)
                    .await?
                    .ok_or_else(|| tenant_not_found(user))?;
                Ok(Tenant {
                    salon_id: found.id,
                    worker_id: None,
                })
            }
            Role::Worker => {
                let found = worker::find_by_user_id(&self.pool, user.id)
                    .await?
                    .ok_or_else(|| tenant_not_found(user))?;
                Ok(Tenant {
                    salon_id: found.salon_id,
                    worker_id: Some(found.id),
                })
            }
        }
    }
}
