use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::domain::services::clock::Clock;

/// Boundaries of the week containing a reference date, anchored to a
/// Monday week start. Derived, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub end_exclusive: NaiveDate,
    pub previous_start: NaiveDate,
    pub next_start: NaiveDate,
    pub label: String,
    pub param: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Strict `YYYY-MM-DD` with zero-padded components. Anything else is
/// treated as absent, not as an error; malformed deep links must fall
/// back to "today" rather than break the calendar.
fn parse_date_param(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        if i == 4 || i == 7 {
            continue;
        }
        if !b.is_ascii_digit() {
            return None;
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Resolves the week containing `param` (or today when `param` is absent
/// or malformed). The start is the most recent Monday at or before the
/// reference date; all arithmetic is plain calendar-day math with no
/// time-of-day component.
pub fn resolve_week_range(param: Option<&str>, clock: &Clock) -> WeekRange {
    let reference = param
        .and_then(parse_date_param)
        .unwrap_or_else(|| clock.today());

    let days_from_monday = reference.weekday().num_days_from_monday() as i64;
    let start = reference - Duration::days(days_from_monday);
    let end = start + Duration::days(6);

    WeekRange {
        start,
        end,
        end_exclusive: start + Duration::days(7),
        previous_start: start - Duration::days(7),
        next_start: start + Duration::days(7),
        label: range_label(start, end),
        param: start.format("%Y-%m-%d").to_string(),
    }
}

/// First and last calendar day of a month. Pure function of the two
/// integers; out-of-range months yield None.
pub fn month_range(year: i32, month: u32) -> Option<MonthRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(MonthRange {
        start,
        end: next_month - Duration::days(1),
    })
}

/// Rebuilds a navigation URL, keeping every query parameter except
/// `week`, which is replaced with the canonical serialization of
/// `target`. Keys are never duplicated.
pub fn build_week_href(base_path: &str, params: &[(String, String)], target: NaiveDate) -> String {
    let target_param = target.format("%Y-%m-%d").to_string();
    let mut query: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, _)| key != "week")
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    query.push(("week", target_param.as_str()));

    match serde_urlencoded::to_string(&query) {
        Ok(qs) => format!("{}?{}", base_path, qs),
        Err(_) => format!("{}?week={}", base_path, target_param),
    }
}

/// Korean-locale range label, rendered by hand so the process locale
/// never leaks into the output.
fn range_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!(
            "{}년 {}월 {}일 ~ {}월 {}일",
            start.year(),
            start.month(),
            start.day(),
            end.month(),
            end.day()
        )
    } else {
        format!(
            "{}년 {}월 {}일 ~ {}년 {}월 {}일",
            start.year(),
            start.month(),
            start.day(),
            end.year(),
            end.month(),
            end.day()
        )
    }
}
