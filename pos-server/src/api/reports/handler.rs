//! Report API Handlers
//!
//! Range boundaries arrive as business-local wall-clock values
//! (`YYYY-MM-DD` or `YYYY-MM-DDTHH:mm:ss`); conversion to UTC millis
//! happens here, the repository only sees `i64`.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::{ReportData, ReportService};
use crate::utils::{AppResponse, AppResult, ok, time};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/reports - 区间内已支付订单 (含明细) 与汇总计数
pub async fn get_report(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<AppResponse<ReportData>>> {
    let company_id = user.require_company()?;
    let tz = state.timezone();
    let (start, end) = time::parse_local_range(&query.start_date, &query.end_date, tz)?;

    let data = ReportService::new(state.pool())
        .report_data(company_id, start, end, tz)
        .await?;
    Ok(ok(data))
}

/// GET /api/reports/export - 区间报表 CSV 下载
pub async fn export_csv(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Response> {
    let company_id = user.require_company()?;
    let tz = state.timezone();
    let (start, end) = time::parse_local_range(&query.start_date, &query.end_date, tz)?;

    let csv = ReportService::new(state.pool())
        .export_csv(company_id, start, end, tz)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales-report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
