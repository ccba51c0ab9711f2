//! Calendar date proximity

use chrono::NaiveDate;

/// Window used by the scoring engine when comparing dates
pub const DEFAULT_DATE_WINDOW_DAYS: i64 = 10;

/// Format of every date field handled by the engine
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, returning `None` for anything else
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Absolute number of days between two dates, if both parse
pub fn day_difference(date1: Option<&str>, date2: Option<&str>) -> Option<i64> {
    let date1 = parse_date(date1?)?;
    let date2 = parse_date(date2?)?;
    Some((date1 - date2).num_days().abs())
}

/// Whether two dates lie at most `max_days` apart.
///
/// Absent or unparsable dates are never close.
pub fn dates_close(date1: Option<&str>, date2: Option<&str>, max_days: i64) -> bool {
    day_difference(date1, date2).is_some_and(|diff| diff <= max_days)
}
