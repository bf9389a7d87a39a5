//! Order API 模块
//!
//! 下单与退款走 [`crate::orders::OrderService`]；列表查询只读。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list_today))
        .route("/{id}/refund", post(handler::refund))
}
