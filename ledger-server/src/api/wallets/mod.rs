//! Wallet API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/workers/{id}/wallet", get(handler::snapshot))
        .route("/api/workers/{id}/wallet/settings", put(handler::update_settings))
        .route("/api/workers/{id}/wallet/recalculate", post(handler::recalculate))
}
