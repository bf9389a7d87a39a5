//! Report API 模块 (日期区间报表)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_report))
        .route("/export", get(handler::export_csv))
}
