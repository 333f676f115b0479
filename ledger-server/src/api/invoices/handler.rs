//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Invoice, InvoiceCreate, InvoiceDetail, InvoiceQuery};

use crate::auth::{TenantContext, require_owner, require_worker_access, scoped_worker_id};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/invoices - 发票列表 (worker_id, limit)
pub async fn list(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Query(mut query): Query<InvoiceQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    query.worker_id = scoped_worker_id(&ctx, query.worker_id)?;
    let invoices = state.ledger.list_invoices(ctx.salon_id(), &query).await?;
    Ok(Json(invoices))
}

/// POST /api/invoices - 生成并支付发票
pub async fn generate(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<InvoiceDetail>> {
    require_owner(&ctx)?;
    let detail = state
        .ledger
        .generate_invoice(ctx.salon_id(), payload, ctx.user.id)
        .await?;
    Ok(Json(detail))
}

/// GET /api/invoices/{id} - 发票详情 (含明细)
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
) -> AppResult<Json<InvoiceDetail>> {
    let detail = state.ledger.invoice_detail(ctx.salon_id(), id).await?;
    require_worker_access(&ctx, detail.invoice.worker_id)?;
    Ok(Json(detail))
}
