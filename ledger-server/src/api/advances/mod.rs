//! Advance API 模块 (预支)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/workers/{id}/advances",
            get(handler::list).post(handler::create),
        )
        .route("/api/advances/{id}", get(handler::get_by_id))
}
