//! Item API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ItemRepository;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::Item;

/// GET /api/items - 当前可售商品 (active, not deleted)
pub async fn list_sellable(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Item>>>> {
    let company_id = user.require_company()?;
    let items = ItemRepository::new(state.pool())
        .find_sellable(company_id)
        .await?;
    Ok(ok(items))
}
