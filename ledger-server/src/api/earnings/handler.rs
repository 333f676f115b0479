//! Earning API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Earning, EarningList, EarningQuery, MarkEarningPaid};

use crate::auth::{TenantContext, require_worker_access, scoped_worker_id};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/earnings - 收益列表 (worker_id, status, start_date, end_date)
pub async fn list(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Query(mut query): Query<EarningQuery>,
) -> AppResult<Json<EarningList>> {
    query.worker_id = scoped_worker_id(&ctx, query.worker_id)?;
    let list = state.ledger.list_earnings(ctx.salon_id(), &query).await?;
    Ok(Json(list))
}

/// GET /api/earnings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Earning>> {
    let earning = state.ledger.find_earning(ctx.salon_id(), id).await?;
    require_worker_access(&ctx, earning.worker_id)?;
    Ok(Json(earning))
}

/// POST /api/earnings/{id}/mark-paid - 客户补付
pub async fn mark_paid(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<MarkEarningPaid>,
) -> AppResult<Json<Earning>> {
    let earning = state.ledger.find_earning(ctx.salon_id(), id).await?;
    require_worker_access(&ctx, earning.worker_id)?;
    let updated = state
        .ledger
        .mark_earning_paid(ctx.salon_id(), id, &payload.payment_method)
        .await?;
    Ok(Json(updated))
}
