//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::orders::OrderService;
use crate::utils::{AppError, AppResponse, AppResult, ok, time};
use shared::models::{Order, OrderWithItems};
use shared::order::CreateOrderRequest;

/// POST /api/orders - 下单
///
/// Cart lines are re-priced from the current catalog; the response
/// carries the persisted order with its frozen total.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let company_id = user.require_company()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = OrderService::new(state.pool())
        .create_order(company_id, &user.user_id, payload)
        .await?;
    Ok(ok(order))
}

/// GET /api/orders - 今日订单 (业务时区)，含明细，新单在前
pub async fn list_today(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<OrderWithItems>>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();

    let now = time::now_millis();
    let today = time::to_local(now, tz).date_naive();
    let start = time::day_start_millis(today, tz);
    let end = time::day_end_millis(today, tz);

    let orders = OrderRepository::new(state.pool())
        .find_in_range_with_items(company_id, start, end)
        .await?;
    Ok(ok(orders))
}

/// POST /api/orders/:id/refund - 退款 (paid → refunded, 只能一次)
pub async fn refund(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let company_id = user.require_company()?;
    let order = OrderService::new(state.pool())
        .refund_order(company_id, &user.user_id, &order_id)
        .await?;
    Ok(ok(order))
}
