//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`TenantResolver`] - 调用者 → 沙龙 (租户) 解析
//! - [`permissions`] - owner / worker access rules

pub mod extractor;
pub mod jwt;
pub mod permissions;
pub mod tenant;

pub use extractor::TenantContext;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use permissions::{require_owner, require_worker_access, scoped_worker_id};
pub use tenant::{SqlTenantResolver, Tenant, TenantResolver};
