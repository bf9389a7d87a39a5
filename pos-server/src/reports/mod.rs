//! Reporting: sales aggregation and export
//!
//! Readers over the order ledger: revenue summaries and time-series
//! for the dashboard, and the flattened CSV download for date-range
//! reports. Refunded orders stay in storage but never count toward
//! revenue; they are excluded, not subtracted.

pub mod aggregate;
pub mod export;


use chrono_tz::Tz;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::{OrderRepository, RepoResult};
use shared::models::{OrderStatus, OrderWithItems};

pub use aggregate::{Bucketing, SalesBucket, SalesSummary, SalesTotals, aggregate};
pub use export::encode_csv;

/// Date-range report payload: the paid orders with their lines plus
/// the period counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub orders: Vec<OrderWithItems>,
    pub total_revenue: f64,
    pub total_orders: i64,
    pub cash_count: i64,
    pub touch_n_go_count: i64,
}

pub struct ReportService {
    orders: OrderRepository,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Aggregate the company's orders in `[start, end]` (UTC millis,
    /// inclusive both ends) into buckets and period totals
    pub async fn summarize(
        &self,
        company_id: &str,
        start: i64,
        end: i64,
        bucketing: Bucketing,
        tz: Tz,
    ) -> RepoResult<SalesSummary> {
        let orders = self.orders.find_in_range(company_id, start, end).await?;
        Ok(aggregate(&orders, bucketing, tz))
    }

    /// Date-range report: paid orders (newest first) with line items,
    /// plus the same totals the dashboard shows
    pub async fn report_data(
        &self,
        company_id: &str,
        start: i64,
        end: i64,
        tz: Tz,
    ) -> RepoResult<ReportData> {
        let all = self
            .orders
            .find_in_range_with_items(company_id, start, end)
            .await?;

        let paid: Vec<OrderWithItems> = all
            .into_iter()
            .filter(|o| o.order.status == OrderStatus::Paid)
            .collect();

        let headers: Vec<_> = paid.iter().map(|o| o.order.clone()).collect();
        let totals = aggregate(&headers, Bucketing::None, tz).totals;

        Ok(ReportData {
            orders: paid,
            total_revenue: totals.revenue,
            total_orders: totals.order_count,
            cash_count: totals.cash_count,
            touch_n_go_count: totals.touch_n_go_count,
        })
    }

    /// CSV rendering of [`Self::report_data`]
    pub async fn export_csv(
        &self,
        company_id: &str,
        start: i64,
        end: i64,
        tz: Tz,
    ) -> RepoResult<String> {
        let data = self.report_data(company_id, start, end, tz).await?;
        Ok(encode_csv(&data.orders, tz))
    }
}
