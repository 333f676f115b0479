//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`completions`] - 服务完成事件 (预约 / 散客)
//! - [`earnings`] - 收益列表与客户延迟付款
//! - [`wallets`] - 钱包快照、设置与对账
//! - [`advances`] - 预支
//! - [`invoices`] - 结算发票

pub mod advances;
pub mod completions;
pub mod earnings;
pub mod health;
pub mod invoices;
pub mod wallets;

use axum::Router;

use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(completions::router())
        .merge(earnings::router())
        .merge(wallets::router())
        .merge(advances::router())
        .merge(invoices::router())
}
