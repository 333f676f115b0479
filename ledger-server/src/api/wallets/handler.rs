//! Wallet API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{ReconcileReport, WalletSettingsUpdate, WalletSnapshot};

use crate::auth::{TenantContext, require_owner, require_worker_access};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/workers/{id}/wallet - 钱包快照
pub async fn snapshot(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(worker_id): Path<i64>,
) -> AppResult<Json<WalletSnapshot>> {
    require_worker_access(&ctx, worker_id)?;
    let snapshot = state.ledger.wallet_snapshot(ctx.salon_id(), worker_id).await?;
    Ok(Json(snapshot))
}

/// PUT /api/workers/{id}/wallet/settings - 预支上限 / 结算周期
pub async fn update_settings(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(worker_id): Path<i64>,
    Json(payload): Json<WalletSettingsUpdate>,
) -> AppResult<Json<WalletSnapshot>> {
    require_owner(&ctx)?;
    let snapshot = state
        .ledger
        .update_wallet_settings(ctx.salon_id(), worker_id, payload)
        .await?;
    Ok(Json(snapshot))
}

/// POST /api/workers/{id}/wallet/recalculate - 对账
pub async fn recalculate(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(worker_id): Path<i64>,
) -> AppResult<Json<ReconcileReport>> {
    require_owner(&ctx)?;
    let report = state
        .ledger
        .recalculate_wallet(ctx.salon_id(), worker_id)
        .await?;
    Ok(Json(report))
}
