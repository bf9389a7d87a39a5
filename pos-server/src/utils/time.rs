//! 时间工具函数 — 业务时区转换
//!
//! Storage timestamps are UTC Unix millis; every reporting boundary is
//! specified in business-local wall-clock time and converted here.
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Current instant as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC millis → business-local date-time
pub fn to_local(millis: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC)
        .with_timezone(&tz)
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 + 时分秒 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap_or_else(|| {
        date.and_time(NaiveTime::MIN)
    });
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// 日期结束 (23:59:59.999) → Unix millis (业务时区)
///
/// 调用方使用 `<= end` (含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 23, 59, 59, tz) + 999
}

/// Wall-clock local midnight on or before the instant, as UTC millis
pub fn start_of_local_day(millis: i64, tz: Tz) -> i64 {
    day_start_millis(to_local(millis, tz).date_naive(), tz)
}

/// 本地日期 key: `YYYY-MM-DD`
pub fn local_date_key(millis: i64, tz: Tz) -> String {
    to_local(millis, tz).format("%Y-%m-%d").to_string()
}

/// 本地 ISO 周 key: `YYYY-Www`
///
/// ISO week numbering: weeks start Monday, week 1 contains the year's
/// first Thursday. The year component is the ISO week-year, which can
/// differ from the calendar year around January 1st.
pub fn local_week_key(millis: i64, tz: Tz) -> String {
    let week = to_local(millis, tz).date_naive().iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// 本地月份 key: `YYYY-MM`
pub fn local_month_key(millis: i64, tz: Tz) -> String {
    to_local(millis, tz).format("%Y-%m").to_string()
}

/// Split a report boundary into date and optional time-of-day.
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DDTHH:mm[:ss]`. A trailing `Z` is
/// stripped: the upstream date picker appends one, but the value is a
/// business-local wall clock, never UTC.
fn parse_local_datetime(input: &str) -> AppResult<(NaiveDate, Option<NaiveTime>)> {
    let trimmed = input.strip_suffix('Z').unwrap_or(input);

    match trimmed.split_once('T') {
        None => Ok((parse_date(trimmed)?, None)),
        Some((date_part, time_part)) => {
            let date = parse_date(date_part)?;
            let time = NaiveTime::parse_from_str(time_part, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
                .map_err(|_| {
                    AppError::validation(format!("Invalid time format: {}", input))
                })?;
            Ok((date, Some(time)))
        }
    }
}

/// 报表区间解析 (业务时区) → `[utc_start, utc_end]` Unix millis
///
/// Both boundaries are read as business-local wall-clock values. A
/// date-only end is widened to `23:59:59.999` local so the final
/// calendar day is fully included.
pub fn parse_local_range(start: &str, end: &str, tz: Tz) -> AppResult<(i64, i64)> {
    let (start_date, start_time) = parse_local_datetime(start)?;
    let (end_date, end_time) = parse_local_datetime(end)?;

    let start_time = start_time.unwrap_or(NaiveTime::MIN);
    let start_millis = date_hms_to_millis(
        start_date,
        start_time.hour(),
        start_time.minute(),
        start_time.second(),
        tz,
    );

    let end_millis = match end_time {
        Some(t) => date_hms_to_millis(end_date, t.hour(), t.minute(), t.second(), tz),
        None => day_end_millis(end_date, tz),
    };

    Ok((start_millis, end_millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Kuala_Lumpur;

    fn utc_millis(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_late_utc_evening_is_next_local_day() {
        // 2024-01-01T16:30:00Z = 2024-01-02T00:30:00+08:00
        let millis = utc_millis(2024, 1, 1, 16, 30, 0);
        assert_eq!(local_date_key(millis, Kuala_Lumpur), "2024-01-02");
    }

    #[test]
    fn test_start_of_local_day() {
        let millis = utc_millis(2024, 1, 1, 16, 30, 0);
        // Local midnight of 2024-01-02 is 2024-01-01T16:00:00Z
        assert_eq!(
            start_of_local_day(millis, Kuala_Lumpur),
            utc_millis(2024, 1, 1, 16, 0, 0)
        );
    }

    #[test]
    fn test_week_key_uses_iso_week_year() {
        // 2024-12-30 (local) is a Monday belonging to 2025-W01
        let millis = utc_millis(2024, 12, 30, 4, 0, 0);
        assert_eq!(local_week_key(millis, Kuala_Lumpur), "2025-W01");

        // 2021-01-01 belongs to 2020-W53
        let millis = utc_millis(2021, 1, 1, 4, 0, 0);
        assert_eq!(local_week_key(millis, Kuala_Lumpur), "2020-W53");
    }

    #[test]
    fn test_month_key() {
        // 2024-03-31T17:00:00Z = 2024-04-01T01:00:00+08:00
        let millis = utc_millis(2024, 3, 31, 17, 0, 0);
        assert_eq!(local_month_key(millis, Kuala_Lumpur), "2024-04");
    }

    #[test]
    fn test_range_date_only_end_widened_to_end_of_day() {
        let (start, end) =
            parse_local_range("2024-03-01", "2024-03-01", Kuala_Lumpur).unwrap();
        // Local midnight 2024-03-01+08:00 = 2024-02-29T16:00:00Z
        assert_eq!(start, utc_millis(2024, 2, 29, 16, 0, 0));
        // Local 23:59:59.999 = 2024-03-01T15:59:59.999Z
        assert_eq!(end, utc_millis(2024, 3, 1, 15, 59, 59) + 999);
    }

    #[test]
    fn test_range_explicit_time_kept() {
        let (start, end) = parse_local_range(
            "2024-03-01T09:30:00",
            "2024-03-01T12:00:00",
            Kuala_Lumpur,
        )
        .unwrap();
        assert_eq!(start, utc_millis(2024, 3, 1, 1, 30, 0));
        assert_eq!(end, utc_millis(2024, 3, 1, 4, 0, 0));
    }

    #[test]
    fn test_range_trailing_z_read_as_local() {
        // A suffixed Z does not make the value UTC: it is still a
        // business-local wall clock.
        let (start, _) = parse_local_range(
            "2024-03-01T09:30:00Z",
            "2024-03-02",
            Kuala_Lumpur,
        )
        .unwrap();
        assert_eq!(start, utc_millis(2024, 3, 1, 1, 30, 0));
    }

    #[test]
    fn test_range_rejects_malformed_input() {
        assert!(parse_local_range("2024-3-1", "2024-03-02", Kuala_Lumpur).is_err());
        assert!(parse_local_range("2024-03-01", "not-a-date", Kuala_Lumpur).is_err());
        assert!(
            parse_local_range("2024-03-01Tnoon", "2024-03-02", Kuala_Lumpur).is_err()
        );
    }
}
