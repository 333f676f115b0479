use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, SqlTenantResolver, TenantResolver};
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::ledger::Ledger;

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | ledger | Ledger | 收益 / 钱包 / 发票服务 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | tenants | Arc<dyn TenantResolver> | 调用者 → 沙龙 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub ledger: Ledger,
    pub jwt_service: Arc<JwtService>,
    pub tenants: Arc<dyn TenantResolver>,
}

impl ServerState {
    /// Build state over an open pool with the SQL tenant resolver
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let tenants = Arc::new(SqlTenantResolver::new(pool.clone()));
        Self::with_resolver(config, pool, tenants)
    }

    pub fn with_resolver(
        config: Config,
        pool: SqlitePool,
        tenants: Arc<dyn TenantResolver>,
    ) -> Self {
        let ledger = Ledger::new(pool.clone(), config.timezone);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            ledger,
            jwt_service,
            tenants,
        }
    }

    /// 初始化服务器状态: 打开数据库 (含迁移) 并装配服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        tracing::info!(
            database = %config.database_path,
            timezone = %config.timezone,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
