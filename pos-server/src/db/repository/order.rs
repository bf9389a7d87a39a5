//! Order Repository
//!
//! Persistence for order headers and their line-item snapshots. Writes
//! are single statements; the engine layer sequences them and rolls
//! back the header when the line-item write fails.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use shared::models::{Order, OrderItem, OrderWithItems};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the order header
    pub async fn insert_order(&self, order: &Order) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO orders \
             (id, company_id, total_amount, payment_type, status, created_at, \
              created_by, refunded_at, refunded_by) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.id)
        .bind(&order.company_id)
        .bind(order.total_amount)
        .bind(order.payment_type)
        .bind(order.status)
        .bind(order.created_at)
        .bind(&order.created_by)
        .bind(order.refunded_at)
        .bind(&order.refunded_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert all line items of one order in a single statement, so a
    /// failure leaves either every line or none.
    pub async fn insert_order_items(&self, items: &[OrderItem]) -> RepoResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO order_items \
             (id, order_id, item_id, item_name_snapshot, item_price_snapshot, quantity) ",
        );
        qb.push_values(items, |mut b, item| {
            b.push_bind(item.id.clone())
                .push_bind(item.order_id.clone())
                .push_bind(item.item_id.clone())
                .push_bind(item.item_name_snapshot.clone())
                .push_bind(item.item_price_snapshot)
                .push_bind(item.quantity);
        });

        qb.build().execute(&self.pool).await?;
        Ok(())
    }

    /// Compensating delete for an orphaned header. Line items (if any
    /// made it in) go with it via ON DELETE CASCADE.
    pub async fn delete_order(&self, order_id: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetch one order scoped to the company
    pub async fn find_by_id(
        &self,
        company_id: &str,
        order_id: &str,
    ) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE id = ? AND company_id = ?",
        )
        .bind(order_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Conditional `paid -> refunded` transition.
    ///
    /// The `status = 'paid'` predicate makes the transition atomic:
    /// of two racing refunds only one can match, the loser sees zero
    /// affected rows. The first transition's `refunded_at`/`refunded_by`
    /// are never overwritten.
    pub async fn mark_refunded(
        &self,
        company_id: &str,
        order_id: &str,
        refunded_at: i64,
        refunded_by: &str,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE orders SET status = 'refunded', refunded_at = ?, refunded_by = ? \
             WHERE id = ? AND company_id = ? AND status = 'paid'",
        )
        .bind(refunded_at)
        .bind(refunded_by)
        .bind(order_id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Orders with `created_at` in `[start, end]` (inclusive both
    /// ends), ascending. The aggregation input.
    pub async fn find_in_range(
        &self,
        company_id: &str,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders \
             WHERE company_id = ? AND created_at >= ? AND created_at <= ? \
             ORDER BY created_at",
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Orders in range with their line items nested, newest first.
    /// The transaction-log and report shape.
    pub async fn find_in_range_with_items(
        &self,
        company_id: &str,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders \
             WHERE company_id = ? AND created_at >= ? AND created_at <= ? \
             ORDER BY created_at DESC",
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
        let mut by_order = self.items_for_orders(&ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    /// Line items for a set of orders, grouped by order id
    async fn items_for_orders(
        &self,
        order_ids: &[String],
    ) -> RepoResult<HashMap<String, Vec<OrderItem>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM order_items WHERE order_id IN (");
        let mut separated = qb.separated(", ");
        for id in order_ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(") ORDER BY id");

        let items = qb
            .build_query_as::<OrderItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id.clone()).or_default().push(item);
        }
        Ok(by_order)
    }

    /// Line items of one order
    pub async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
