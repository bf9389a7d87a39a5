//! Order Model
//!
//! Orders are immutable once created except for the single
//! `paid -> refunded` transition. `total_amount` is fixed at creation
//! as the sum of line snapshots and is never recomputed.

use serde::{Deserialize, Serialize};

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentType {
    Cash,
    TouchNGo,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::TouchNGo => "touch_n_go",
        }
    }
}

/// Order lifecycle states. `Refunded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Paid,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Refunded => "refunded",
        }
    }
}

/// Order header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub company_id: String,
    /// Sum of `item_price_snapshot * quantity` over the line items,
    /// computed at creation time
    pub total_amount: f64,
    pub payment_type: PaymentType,
    pub status: OrderStatus,
    /// Unix millis (UTC)
    pub created_at: i64,
    pub created_by: Option<String>,
    pub refunded_at: Option<i64>,
    pub refunded_by: Option<String>,
}

impl Order {
    pub fn is_refunded(&self) -> bool {
        self.status == OrderStatus::Refunded
    }
}

/// Order line item. Immutable once written.
///
/// `item_name_snapshot` / `item_price_snapshot` freeze the catalog
/// state at sale time; later catalog edits (or soft deletion, which
/// nulls `item_id`) never change what was charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub item_id: Option<String>,
    pub item_name_snapshot: String,
    pub item_price_snapshot: f64,
    pub quantity: i64,
}

/// Order header with its line items nested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
