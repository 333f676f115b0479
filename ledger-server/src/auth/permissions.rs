//! Access rules
//!
//! Owners act on every worker of their salon. Workers only see their own
//! ledger data and may mark their own earnings paid.

use super::TenantContext;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Owner-only operations
pub fn require_owner(ctx: &TenantContext) -> AppResult<()> {
    if ctx.user.is_owner() {
        return Ok(());
    }
    crate::security_log!(
        "WARN",
        "owner_required",
        user_id = ctx.user.id,
        salon_id = ctx.tenant.salon_id
    );
    Err(AppError::new(ErrorCode::OwnerRequired))
}

/// Owners pass; workers only for their own worker id
pub fn require_worker_access(ctx: &TenantContext, worker_id: i64) -> AppResult<()> {
    if ctx.user.is_owner() || ctx.tenant.worker_id == Some(worker_id) {
        return Ok(());
    }
    crate::security_log!(
        "WARN",
        "worker_scope_denied",
        user_id = ctx.user.id,
        worker_id = worker_id
    );
    Err(AppError::permission_denied(format!(
        "Access to worker {} is not allowed",
        worker_id
    )))
}

/// Worker id a listing is restricted to: workers always see only themselves
pub fn scoped_worker_id(ctx: &TenantContext, requested: Option<i64>) -> AppResult<Option<i64>> {
    match ctx.tenant.worker_id {
        None if ctx.user.is_owner() => Ok(requested),
        Some(own) => match requested {
            Some(id) if id != own => {
                require_worker_access(ctx, id)?;
                Ok(Some(id))
            }
            _ => Ok(Some(own)),
        },
        None => Err(AppError::permission_denied("Caller has no worker record")),
    }
}
