//! Salon Ledger Server - 员工收益与钱包账本
//!
//! # 架构概述
//!
//! - **账本** (`ledger`): 提成计算、收益记录、预支、钱包、发票结算、对账
//! - **数据库** (`db`): SQLite (WAL) + 迁移 + 仓储函数
//! - **认证** (`auth`): JWT 身份 + 租户解析
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! ledger-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT、租户、访问规则
//! ├── api/           # HTTP 路由和处理器
//! ├── ledger/        # 账本服务
//! ├── db/            # 数据库层
//! └── utils/         # 日志、错误、时间、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use ledger::Ledger;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
