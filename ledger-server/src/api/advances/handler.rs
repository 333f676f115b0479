//! Advance API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Advance, AdvanceCreate, AdvanceList, AdvanceQuery};

use crate::auth::{TenantContext, require_owner, require_worker_access};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/workers/{id}/advances
pub async fn list(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(worker_id): Path<i64>,
    Query(query): Query<AdvanceQuery>,
) -> AppResult<Json<AdvanceList>> {
    require_worker_access(&ctx, worker_id)?;
    let list = state
        .ledger
        .list_advances(ctx.salon_id(), worker_id, query.status)
        .await?;
    Ok(Json(list))
}

/// POST /api/workers/{id}/advances - 发放预支
pub async fn create(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(worker_id): Path<i64>,
    Json(payload): Json<AdvanceCreate>,
) -> AppResult<Json<Advance>> {
    require_owner(&ctx)?;
    let advance = state
        .ledger
        .give_advance(ctx.salon_id(), worker_id, payload, ctx.user.id)
        .await?;
    Ok(Json(advance))
}

/// GET /api/advances/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Advance>> {
    let advance = state.ledger.find_advance(ctx.salon_id(), id).await?;
    require_worker_access(&ctx, advance.worker_id)?;
    Ok(Json(advance))
}
