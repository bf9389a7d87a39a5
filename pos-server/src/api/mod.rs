//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`items`] - 收银屏商品列表 (read-only)
//! - [`orders`] - 下单、今日订单、退款
//! - [`reports`] - 日期区间报表与 CSV 导出
//! - [`analytics`] - 仪表盘指标与销售时序

pub mod analytics;
pub mod health;
pub mod items;
pub mod orders;
pub mod reports;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(items::router())
        .merge(orders::router())
        .merge(reports::router())
        .merge(analytics::router())
        .with_state(state)
}
