//! Order Service
//!
//! The two ledger mutations of the system: ring up a sale, mark a
//! refund. Everything else is read-only.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::error::OrderError;
use super::money;
use crate::db::repository::{ItemRepository, OrderRepository};
use crate::utils::time;
use shared::models::{Item, Order, OrderItem, OrderStatus};
use shared::order::CreateOrderRequest;

pub struct OrderService {
    items: ItemRepository,
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            items: ItemRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }

    /// Create an order from a cart.
    ///
    /// Re-prices every line from the current catalog and freezes
    /// name/price snapshots onto the line items, then writes header
    /// and lines as two sequential statements. If the line-item write
    /// fails the header is deleted again, so nothing partial stays
    /// observable.
    pub async fn create_order(
        &self,
        company_id: &str,
        actor_id: &str,
        request: CreateOrderRequest,
    ) -> Result<Order, OrderError> {
        validate_cart(&request)?;

        // Resolve every distinct item id, scoped to the company
        let distinct_ids: Vec<String> = request
            .items
            .iter()
            .map(|line| line.item_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let catalog: HashMap<String, Item> = self
            .items
            .find_by_ids(company_id, &distinct_ids)
            .await?
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        // Price the cart before any write
        let order_id = Uuid::new_v4().to_string();
        let mut total = Decimal::ZERO;
        let mut order_items = Vec::with_capacity(request.items.len());

        for line in &request.items {
            let item = catalog
                .get(&line.item_id)
                .ok_or_else(|| OrderError::ItemNotFound(line.item_id.clone()))?;

            total += money::line_total(item.price, line.quantity);

            order_items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                item_id: Some(item.id.clone()),
                item_name_snapshot: item.name.clone(),
                item_price_snapshot: item.price,
                quantity: line.quantity,
            });
        }

        let order = Order {
            id: order_id,
            company_id: company_id.to_string(),
            total_amount: money::to_f64(total),
            payment_type: request.payment_type,
            status: OrderStatus::Paid,
            created_at: time::now_millis(),
            created_by: Some(actor_id.to_string()),
            refunded_at: None,
            refunded_by: None,
        };

        self.orders.insert_order(&order).await.map_err(|e| {
            tracing::error!(error = %e, "Order header insert failed");
            OrderError::Persistence("Failed to create order".into())
        })?;

        if let Err(e) = self.orders.insert_order_items(&order_items).await {
            // Compensating rollback: the store gives no multi-statement
            // transaction, so remove the orphaned header ourselves.
            tracing::warn!(
                order_id = %order.id,
                error = %e,
                "Line-item insert failed, rolling back order header"
            );
            if let Err(del) = self.orders.delete_order(&order.id).await {
                tracing::error!(
                    order_id = %order.id,
                    error = %del,
                    "Compensating delete failed, header may be orphaned"
                );
            }
            return Err(OrderError::Persistence(
                "Failed to create order items".into(),
            ));
        }

        tracing::info!(
            order_id = %order.id,
            company_id = %company_id,
            total = order.total_amount,
            payment_type = order.payment_type.as_str(),
            lines = order_items.len(),
            "Order created"
        );

        Ok(order)
    }

    /// Transition an order `paid -> refunded`, exactly once.
    ///
    /// The write is a single conditional update keyed on
    /// `status = 'paid'`; a second attempt (or the loser of a race)
    /// gets `AlreadyRefunded`, never a silent success.
    pub async fn refund_order(
        &self,
        company_id: &str,
        actor_id: &str,
        order_id: &str,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .find_by_id(company_id, order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        if order.is_refunded() {
            return Err(OrderError::AlreadyRefunded(order_id.to_string()));
        }

        let refunded_at = time::now_millis();
        let affected = self
            .orders
            .mark_refunded(company_id, order_id, refunded_at, actor_id)
            .await?;

        if affected == 0 {
            // Lost the race against a concurrent refund
            return Err(OrderError::AlreadyRefunded(order_id.to_string()));
        }

        tracing::info!(
            order_id = %order_id,
            company_id = %company_id,
            refunded_by = %actor_id,
            "Order refunded"
        );

        Ok(Order {
            status: OrderStatus::Refunded,
            refunded_at: Some(refunded_at),
            refunded_by: Some(actor_id.to_string()),
            ..order
        })
    }
}

/// Cart-level input constraints, checked before any store access
fn validate_cart(request: &CreateOrderRequest) -> Result<(), OrderError> {
    if request.items.is_empty() {
        return Err(OrderError::Validation(
            "At least one item is required".into(),
        ));
    }
    for line in &request.items {
        if line.quantity < 1 {
            return Err(OrderError::Validation(format!(
                "quantity must be positive, got {}",
                line.quantity
            )));
        }
        if line.quantity > money::MAX_QUANTITY {
            return Err(OrderError::Validation(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                money::MAX_QUANTITY,
                line.quantity
            )));
        }
    }
    Ok(())
}
