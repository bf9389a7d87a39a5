//! Analytics API Handlers
//!
//! Trailing-window series for the dashboard charts. Windows start at
//! business-local midnight; series are sparse (days with no sales are
//! simply absent, the chart fills gaps client-side).

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::{Bucketing, ReportService, SalesBucket};
use crate::utils::{AppResponse, AppResult, ok, time};

/// 仪表盘今日指标
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub today_revenue: f64,
    pub orders_today: i64,
    pub cash_count: i64,
    pub touch_n_go_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    #[serde(default = "default_weeks")]
    pub weeks: i64,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    #[serde(default = "default_months")]
    pub months: i64,
}

fn default_days() -> i64 {
    30
}

fn default_weeks() -> i64 {
    12
}

fn default_months() -> i64 {
    12
}

/// GET /api/analytics/dashboard - 今日营收与订单数 (业务时区)
pub async fn dashboard(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<DashboardMetrics>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();

    let now = time::now_millis();
    let start = time::start_of_local_day(now, tz);

    let summary = ReportService::new(state.pool())
        .summarize(company_id, start, now, Bucketing::None, tz)
        .await?;

    Ok(ok(DashboardMetrics {
        today_revenue: summary.totals.revenue,
        orders_today: summary.totals.order_count,
        cash_count: summary.totals.cash_count,
        touch_n_go_count: summary.totals.touch_n_go_count,
    }))
}

/// GET /api/analytics/daily - 近 N 天每日营收 (默认 30)
pub async fn daily_sales(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<AppResponse<Vec<SalesBucket>>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();

    let now = time::now_millis();
    let today = time::to_local(now, tz).date_naive();
    let start_date = today - Duration::days(query.days.max(1));
    let start = time::day_start_millis(start_date, tz);

    let summary = ReportService::new(state.pool())
        .summarize(company_id, start, now, Bucketing::Day, tz)
        .await?;
    Ok(ok(summary.buckets))
}

/// GET /api/analytics/weekly - 近 N 周每周营收 (ISO 周, 默认 12)
pub async fn weekly_sales(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<WeeklyQuery>,
) -> AppResult<Json<AppResponse<Vec<SalesBucket>>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();

    let now = time::now_millis();
    let today = time::to_local(now, tz).date_naive();
    let start_date = today - Duration::weeks(query.weeks.max(1));
    let start = time::day_start_millis(start_date, tz);

    let summary = ReportService::new(state.pool())
        .summarize(company_id, start, now, Bucketing::Week, tz)
        .await?;
    Ok(ok(summary.buckets))
}

/// GET /api/analytics/monthly - 近 N 月每月营收 (默认 12)
pub async fn monthly_sales(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<MonthlyQuery>,
) -> AppResult<Json<AppResponse<Vec<SalesBucket>>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();

    let now = time::now_millis();
    let today = time::to_local(now, tz).date_naive();
    let months = query.months.max(1).min(u32::MAX as i64) as u32;
    let start_date = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(today);
    let start = time::day_start_millis(start_date, tz);

    let summary = ReportService::new(state.pool())
        .summarize(company_id, start, now, Bucketing::Month, tz)
        .await?;
    Ok(ok(summary.buckets))
}
