//! Sales Aggregation Engine
//!
//! Reduces a window of orders into revenue buckets and summary
//! counters. Bucket keys come from the business-local calendar, not
//! UTC: a sale at 00:30 local belongs to the new local day even
//! though its stored instant is still the previous UTC day.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::money;
use crate::utils::time;
use shared::models::{Order, OrderStatus, PaymentType};

/// Bucket granularity for time-series aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucketing {
    Day,
    Week,
    Month,
    /// Period totals only, no series
    None,
}

/// One point of a revenue series, keyed `YYYY-MM-DD` / `YYYY-Www` /
/// `YYYY-MM` depending on granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBucket {
    pub key: String,
    pub revenue: f64,
}

/// Period counters over paid orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub revenue: f64,
    pub order_count: i64,
    pub cash_count: i64,
    pub touch_n_go_count: i64,
}

/// Aggregation result: sparse ascending series plus totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub buckets: Vec<SalesBucket>,
    pub totals: SalesTotals,
}

/// Reduce orders into buckets and totals.
///
/// Only `status = paid` orders count; refunded ones are skipped
/// entirely. Buckets with no matching order are omitted (sparse
/// series) and emitted in ascending key order. Same input, same
/// output: the reduction carries no ambient state.
pub fn aggregate(orders: &[Order], bucketing: Bucketing, tz: Tz) -> SalesSummary {
    let mut revenue = Decimal::ZERO;
    let mut order_count = 0i64;
    let mut cash_count = 0i64;
    let mut touch_n_go_count = 0i64;
    let mut series: BTreeMap<String, Decimal> = BTreeMap::new();

    for order in orders {
        if order.status != OrderStatus::Paid {
            continue;
        }

        let amount = money::to_decimal(order.total_amount);
        revenue += amount;
        order_count += 1;
        match order.payment_type {
            PaymentType::Cash => cash_count += 1,
            PaymentType::TouchNGo => touch_n_go_count += 1,
        }

        let key = match bucketing {
            Bucketing::Day => time::local_date_key(order.created_at, tz),
            Bucketing::Week => time::local_week_key(order.created_at, tz),
            Bucketing::Month => time::local_month_key(order.created_at, tz),
            Bucketing::None => continue,
        };
        *series.entry(key).or_insert(Decimal::ZERO) += amount;
    }

    SalesSummary {
        buckets: series
            .into_iter()
            .map(|(key, amount)| SalesBucket {
                key,
                revenue: money::to_f64(amount),
            })
            .collect(),
        totals: SalesTotals {
            revenue: money::to_f64(revenue),
            order_count,
            cash_count,
            touch_n_go_count,
        },
    }
}
