//! Completion API 模块 (服务完成 → 收益)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/appointments/{id}/complete", post(handler::complete))
        .route("/api/walk-ins", post(handler::walk_in))
}
