//! Item Repository
//!
//! Read access to the catalog. Item CRUD belongs to the external
//! admin surface writing the same store; the order engine only ever
//! reads current prices from here.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use shared::models::Item;

#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch items by id, scoped to the company.
    ///
    /// Deliberately ignores `is_active`/`deleted_at`: order creation
    /// resolves whatever ids the register submitted, so an item
    /// deactivated mid-transaction can still complete its sale.
    pub async fn find_by_ids(
        &self,
        company_id: &str,
        ids: &[String],
    ) -> RepoResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM items WHERE company_id = ");
        qb.push_bind(company_id.to_string());
        qb.push(" AND id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");

        let items = qb.build_query_as::<Item>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    /// Active, non-deleted items for the register screen
    pub async fn find_sellable(&self, company_id: &str) -> RepoResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items \
             WHERE company_id = ? AND is_active = 1 AND deleted_at IS NULL \
             ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Insert a catalog row. Used by provisioning/seeding and tests;
    /// the admin CRUD surface owns this table in production.
    pub async fn insert(&self, item: &Item) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO items \
             (id, company_id, name, price, is_active, created_at, created_by, \
              updated_at, updated_by, deleted_at, deleted_by) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.company_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(&item.created_by)
        .bind(item.updated_at)
        .bind(&item.updated_by)
        .bind(item.deleted_at)
        .bind(&item.deleted_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Update the current price. Historical order lines keep their
    /// snapshots; this only affects future sales.
    pub async fn update_price(
        &self,
        company_id: &str,
        item_id: &str,
        price: f64,
        updated_at: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            "UPDATE items SET price = ?, updated_at = ? \
             WHERE id = ? AND company_id = ?",
        )
        .bind(price)
        .bind(updated_at)
        .bind(item_id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
