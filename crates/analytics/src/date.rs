//! Date-key helpers.
//!
//! Journal records are identified by zero-padded `YYYY-MM-DD` strings, so
//! lexicographic order on the key equals calendar order. Everything here
//! works on timezone-free [`NaiveDate`] values: weekday and week-boundary
//! derivations must not shift by a day depending on the host timezone.

use crate::error::AnalyticsError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use core_types::DayRecord;

/// Parses a `YYYY-MM-DD` date key into a calendar date.
pub fn parse_date_key(id: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(id, "%Y-%m-%d")
        .map_err(|_| AnalyticsError::InvalidDateKey(id.to_string()))
}

/// The (year, month) pair a date key falls in.
pub fn month_key(id: &str) -> Result<(i32, u32), AnalyticsError> {
    let date = parse_date_key(id)?;
    Ok((date.year(), date.month()))
}

/// Whether the date is a Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The Sunday-start/Saturday-end week containing `date`, inclusive on both
/// ends.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(date.weekday().num_days_from_sunday());
    // num_days_from_sunday is at most 6, so neither step can overflow the
    // calendar range of any parseable date key.
    let start = date.checked_sub_days(Days::new(back)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    (start, end)
}

/// The records in chronological order, without mutating the caller's slice.
pub(crate) fn chronological(records: &[DayRecord]) -> Vec<&DayRecord> {
    let mut ordered: Vec<&DayRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_keys() {
        let date = parse_date_key("2024-03-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));

        assert!(parse_date_key("15-03-2024").is_err());
        assert!(parse_date_key("2024-3-15x").is_err());
    }

    #[test]
    fn month_key_splits_year_and_month() {
        assert_eq!(month_key("2023-12-31").unwrap(), (2023, 12));
    }

    #[test]
    fn weekday_test_excludes_weekends() {
        // 2024-01-06 is a Saturday, 2024-01-08 a Monday.
        assert!(!is_weekday(parse_date_key("2024-01-06").unwrap()));
        assert!(!is_weekday(parse_date_key("2024-01-07").unwrap()));
        assert!(is_weekday(parse_date_key("2024-01-08").unwrap()));
    }

    #[test]
    fn week_bounds_are_sunday_through_saturday() {
        // 2024-01-10 is a Wednesday.
        let (start, end) = week_bounds(parse_date_key("2024-01-10").unwrap());
        assert_eq!(start, parse_date_key("2024-01-07").unwrap());
        assert_eq!(end, parse_date_key("2024-01-13").unwrap());

        // A Sunday is its own week start.
        let (start, end) = week_bounds(parse_date_key("2024-01-07").unwrap());
        assert_eq!(start, parse_date_key("2024-01-07").unwrap());
        assert_eq!(end, parse_date_key("2024-01-13").unwrap());
    }
}
