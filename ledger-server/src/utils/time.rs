//! 时间工具函数 (业务时区转换)
//!
//! Service dates are business-timezone calendar days (`YYYY-MM-DD`); stored
//! timestamps are Unix millis.

use chrono::{Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an optional inclusive date range, rejecting `start > end`
pub fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;
    if let (Some(s), Some(e)) = (start, end)
        && s > e
    {
        return Err(AppError::validation(format!(
            "start_date {} is after end_date {}",
            s, e
        )));
    }
    Ok((start, end))
}

/// Render a date as stored (`YYYY-MM-DD`)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Business-day of a Unix millis timestamp
pub fn millis_to_date(millis: i64, tz: Tz) -> NaiveDate {
    match tz.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.date_naive(),
        None => chrono::Utc::now().with_timezone(&tz).date_naive(),
    }
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// First instant of the month containing `now_millis` (业务时区)
pub fn month_start_millis(now_millis: i64, tz: Tz) -> i64 {
    let today = millis_to_date(now_millis, tz);
    let first = today.with_day(1).unwrap_or(today);
    day_start_millis(first, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
        );
        assert!(parse_date("05/03/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_parse_date_range_rejects_inverted() {
        assert!(parse_date_range(Some("2026-03-10"), Some("2026-03-01")).is_err());
        let (s, e) = parse_date_range(Some("2026-03-01"), None).unwrap();
        assert!(s.is_some());
        assert!(e.is_none());
    }

    #[test]
    fn test_millis_to_date_uses_business_timezone() {
        // 2026-03-01 23:30 UTC is already March 2nd in Madrid
        let millis = chrono::Utc
            .with_ymd_and_hms(2026, 3, 1, 23, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_date(millis_to_date(millis, chrono_tz::UTC)), "2026-03-01");
        assert_eq!(
            format_date(millis_to_date(millis, chrono_tz::Europe::Madrid)),
            "2026-03-02"
        );
    }

    #[test]
    fn test_month_start_millis() {
        let mid_month = chrono::Utc
            .with_ymd_and_hms(2026, 3, 17, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let expected = chrono::Utc
            .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(month_start_millis(mid_month, chrono_tz::UTC), expected);
    }
}
