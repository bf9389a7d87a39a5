//! Health API Handlers

use axum::Json;
use serde::Serialize;

use crate::utils::time;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
}

/// GET /api/health - 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: time::now_millis(),
    })
}
