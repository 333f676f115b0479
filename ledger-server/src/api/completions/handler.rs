//! Completion API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{CompletionOutcome, ServiceCompletion};

use crate::auth::{TenantContext, require_owner};
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/appointments/{id}/complete - 预约完成
pub async fn complete(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(appointment_id): Path<i64>,
    Json(payload): Json<ServiceCompletion>,
) -> AppResult<Json<CompletionOutcome>> {
    require_owner(&ctx)?;
    let outcome = state
        .ledger
        .complete_appointment(ctx.salon_id(), appointment_id, payload)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/walk-ins - 散客 (创建即完成)
pub async fn walk_in(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Json(payload): Json<ServiceCompletion>,
) -> AppResult<Json<CompletionOutcome>> {
    require_owner(&ctx)?;
    let outcome = state.ledger.record_walk_in(ctx.salon_id(), payload).await?;
    Ok(Json(outcome))
}
