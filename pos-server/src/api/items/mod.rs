//! Item API 模块
//!
//! Read-only: the register screen lists what is currently sellable.
//! Catalog mutations belong to the external admin surface.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list_sellable))
}
