//! Item Model
//!
//! Catalog items are soft-deleted only: a deleted or deactivated item
//! is ineligible for new orders, but order lines keep their own
//! name/price snapshot, so historical records never dangle.

use serde::{Deserialize, Serialize};

/// Sellable catalog item, owned by a company
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: String,
    pub company_id: String,
    pub name: String,
    /// Current unit price. Monetary math is done in `Decimal`,
    /// storage and serialization use `f64` rounded to 2 dp.
    pub price: f64,
    pub is_active: bool,
    /// Unix millis (UTC)
    pub created_at: i64,
    pub created_by: Option<String>,
    pub updated_at: i64,
    pub updated_by: Option<String>,
    pub deleted_at: Option<i64>,
    pub deleted_by: Option<String>,
}

impl Item {
    /// Eligible to appear on the register screen
    pub fn is_sellable(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}
