//! Order request payloads
//!
//! What the register screen submits when ringing up a sale. The
//! server re-prices every line from the current catalog; client-sent
//! prices are never trusted (there are none to send).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PaymentType;

/// One cart line: an item reference and how many
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartLine {
    #[validate(length(min = 1, message = "item_id is required"))]
    pub item_id: String,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<CartLine>,
    pub payment_type: PaymentType,
}
