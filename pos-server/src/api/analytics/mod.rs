//! Analytics API 模块 (仪表盘)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/daily", get(handler::daily_sales))
        .route("/weekly", get(handler::weekly_sales))
        .route("/monthly", get(handler::monthly_sales))
}
