//! Attribution and calendar-bucket groupings.
//!
//! These views deliberately run on whatever slice the caller hands in:
//! raw-P&L attribution charts want the unfiltered journal, while the
//! aggregate dashboard usually passes an outlier-filtered copy.

use crate::date::{self, chronological};
use crate::error::AnalyticsError;
use crate::report::{DayOfWeekPL, ReturnBin, ReturnDistribution, TagPL, TickerPL};
use chrono::{Datelike, Local};
use core_types::DayRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Width of a return-distribution histogram bin, in percentage points.
const BIN_WIDTH: f64 = 5.0;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Per-symbol P&L attribution.
///
/// Each day's `total_pl` is distributed evenly across that day's trades (the
/// journal records no per-trade P&L, so an even split is the convention) and
/// accumulated per symbol together with a trade count. Sorted by P&L
/// descending, symbol ascending on ties.
pub fn pl_by_ticker(records: &[DayRecord]) -> Vec<TickerPL> {
    let mut by_symbol: HashMap<&str, (f64, u32)> = HashMap::new();

    for record in records {
        if record.trades.is_empty() {
            continue;
        }
        let share = record.total_pl / record.trades.len() as f64;
        for trade in &record.trades {
            let entry = by_symbol.entry(trade.symbol.as_str()).or_insert((0.0, 0));
            entry.0 += share;
            entry.1 += 1;
        }
    }

    let mut attribution: Vec<TickerPL> = by_symbol
        .into_iter()
        .map(|(symbol, (total_pl, trades))| TickerPL {
            symbol: symbol.to_string(),
            total_pl,
            trades,
        })
        .collect();
    attribution.sort_by(|a, b| {
        b.total_pl
            .partial_cmp(&a.total_pl)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    attribution
}

/// P&L summed into the seven weekday buckets, always returned in full and in
/// fixed Sunday-first order.
pub fn pl_by_day_of_week(records: &[DayRecord]) -> Result<Vec<DayOfWeekPL>, AnalyticsError> {
    let mut totals = [0.0f64; 7];
    for record in records {
        let day = date::parse_date_key(&record.id)?;
        totals[day.weekday().num_days_from_sunday() as usize] += record.total_pl;
    }
    Ok(DAY_NAMES
        .iter()
        .zip(totals)
        .map(|(day, total_pl)| DayOfWeekPL {
            day: (*day).to_string(),
            total_pl,
        })
        .collect())
}

/// P&L attributed to each tag.
///
/// A record contributes its full `total_pl` to every tag it carries, so a
/// multi-tag day is double-counted across its tags. Sorted by P&L descending,
/// tag ascending on ties.
pub fn pl_by_tag(records: &[DayRecord]) -> Vec<TagPL> {
    let mut by_tag: HashMap<&str, (f64, u32)> = HashMap::new();

    for record in records {
        for tag in &record.tags {
            let entry = by_tag.entry(tag.as_str()).or_insert((0.0, 0));
            entry.0 += record.total_pl;
            entry.1 += 1;
        }
    }

    let mut attribution: Vec<TagPL> = by_tag
        .into_iter()
        .map(|(tag, (total_pl, days))| TagPL {
            tag: tag.to_string(),
            total_pl,
            days,
        })
        .collect();
    attribution.sort_by(|a, b| {
        b.total_pl
            .partial_cmp(&a.total_pl)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    attribution
}

/// Flattens every per-trade percent return and bins them into 5-point-wide
/// half-open `[lower, upper)` intervals. The covered span runs from
/// `min(floor(min_return), 0)` upward in bin-width steps until the ceiling of
/// the maximum return is inside a bin, so zero is always within the span.
pub fn return_distribution(records: &[DayRecord]) -> ReturnDistribution {
    let returns: Vec<f64> = records
        .iter()
        .flat_map(|r| r.trades.iter().map(|t| t.percent_return))
        .collect();
    if returns.is_empty() {
        return ReturnDistribution::default();
    }

    let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min.floor().min(0.0);
    let hi = max.ceil().max(0.0);

    let mut bins = Vec::new();
    let mut edge = lo;
    // `edge <= hi` keeps an exact-ceiling maximum inside the last bin.
    while edge <= hi {
        let upper = edge + BIN_WIDTH;
        let count = returns.iter().filter(|v| **v >= edge && **v < upper).count() as u32;
        bins.push(ReturnBin {
            lower: edge,
            upper,
            count,
        });
        edge = upper;
    }

    ReturnDistribution { returns, bins }
}

/// Sum of `total_pl` over the records falling in the given (year, month).
pub fn monthly_pl(records: &[DayRecord], year: i32, month: u32) -> Result<f64, AnalyticsError> {
    let mut total = 0.0;
    for record in records {
        if date::month_key(&record.id)? == (year, month) {
            total += record.total_pl;
        }
    }
    Ok(total)
}

/// Sum of falling-knife counts over the records in the given (year, month).
pub fn monthly_falling_knives(
    records: &[DayRecord],
    year: i32,
    month: u32,
) -> Result<u32, AnalyticsError> {
    let mut total = 0;
    for record in records {
        if date::month_key(&record.id)? == (year, month) {
            total += record.falling_knives();
        }
    }
    Ok(total)
}

/// Sum of `total_pl` over the Sunday-through-Saturday week containing the
/// most recent record. An empty journal reports 0.
pub fn weekly_pl(records: &[DayRecord]) -> Result<f64, AnalyticsError> {
    let Some(latest) = chronological(records).last().copied() else {
        return Ok(0.0);
    };
    let (start, end) = date::week_bounds(date::parse_date_key(&latest.id)?);

    let mut total = 0.0;
    for record in records {
        let day = date::parse_date_key(&record.id)?;
        if day >= start && day <= end {
            total += record.total_pl;
        }
    }
    Ok(total)
}

/// The (year, month) of the chronologically latest record, defaulting to the
/// current calendar month for an empty journal.
pub fn latest_month(records: &[DayRecord]) -> Result<(i32, u32), AnalyticsError> {
    match chronological(records).last() {
        Some(latest) => date::month_key(&latest.id),
        None => {
            let today = Local::now().date_naive();
            Ok((today.year(), today.month()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{day, day_with_tags, day_with_trades};

    #[test]
    fn ticker_attribution_splits_evenly_and_sorts() {
        let records = [
            day_with_trades("2024-01-01", 90.0, &[("AAPL", 1.0), ("AAPL", 2.0), ("MSFT", -0.5)]),
            day_with_trades("2024-01-02", -30.0, &[("MSFT", -1.0)]),
        ];
        let attribution = pl_by_ticker(&records);
        assert_eq!(attribution.len(), 2);

        assert_eq!(attribution[0].symbol, "AAPL");
        assert!((attribution[0].total_pl - 60.0).abs() < 1e-12);
        assert_eq!(attribution[0].trades, 2);

        assert_eq!(attribution[1].symbol, "MSFT");
        assert!((attribution[1].total_pl - 0.0).abs() < 1e-12);
        assert_eq!(attribution[1].trades, 2);
    }

    #[test]
    fn ticker_attribution_breaks_ties_by_symbol() {
        let records = [day_with_trades("2024-01-01", 100.0, &[("ZM", 1.0), ("AA", 1.0)])];
        let attribution = pl_by_ticker(&records);
        assert_eq!(attribution[0].symbol, "AA");
        assert_eq!(attribution[1].symbol, "ZM");
    }

    #[test]
    fn day_of_week_always_has_seven_buckets() {
        let empty = pl_by_day_of_week(&[]).unwrap();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0].day, "Sunday");
        assert_eq!(empty[6].day, "Saturday");
        assert!(empty.iter().all(|b| b.total_pl == 0.0));
    }

    #[test]
    fn day_of_week_buckets_by_calendar_day() {
        // 2024-01-07 is a Sunday, 2024-01-08 a Monday.
        let records = [
            day("2024-01-07", 25.0),
            day("2024-01-08", 100.0),
            day("2024-01-15", -40.0),
        ];
        let buckets = pl_by_day_of_week(&records).unwrap();
        assert_eq!(buckets[0].total_pl, 25.0);
        assert_eq!(buckets[1].total_pl, 60.0);
        assert!(pl_by_day_of_week(&[day("bad-key", 0.0)]).is_err());
    }

    #[test]
    fn tag_attribution_double_counts_by_design() {
        let records = [
            day_with_tags("2024-01-01", 100.0, &["breakout", "gap"]),
            day_with_tags("2024-01-02", -20.0, &["gap"]),
        ];
        let attribution = pl_by_tag(&records);
        assert_eq!(attribution[0].tag, "breakout");
        assert_eq!(attribution[0].total_pl, 100.0);
        assert_eq!(attribution[0].days, 1);
        assert_eq!(attribution[1].tag, "gap");
        assert_eq!(attribution[1].total_pl, 80.0);
        assert_eq!(attribution[1].days, 2);
    }

    #[test]
    fn return_distribution_bins_span_zero() {
        let records = [day_with_trades(
            "2024-01-01",
            0.0,
            &[("A", -7.3), ("B", 2.0), ("C", 12.0)],
        )];
        let dist = return_distribution(&records);
        assert_eq!(dist.returns.len(), 3);

        // Bins step by 5 from -8 through the ceiling of 12.
        let edges: Vec<f64> = dist.bins.iter().map(|b| b.lower).collect();
        assert_eq!(edges, vec![-8.0, -3.0, 2.0, 7.0, 12.0]);
        let counts: Vec<u32> = dist.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn return_distribution_without_trades_is_empty() {
        let dist = return_distribution(&[day("2024-01-01", 50.0)]);
        assert!(dist.returns.is_empty());
        assert!(dist.bins.is_empty());
    }

    #[test]
    fn monthly_sums_respect_the_selector() {
        let mut january_knives = day("2024-01-10", 40.0);
        january_knives.falling_knives = Some(3);
        let records = [
            january_knives,
            day("2024-01-20", -10.0),
            day("2024-02-01", 500.0),
        ];
        assert_eq!(monthly_pl(&records, 2024, 1).unwrap(), 30.0);
        assert_eq!(monthly_pl(&records, 2024, 2).unwrap(), 500.0);
        assert_eq!(monthly_pl(&records, 2023, 12).unwrap(), 0.0);
        assert_eq!(monthly_falling_knives(&records, 2024, 1).unwrap(), 3);
        assert_eq!(monthly_falling_knives(&records, 2024, 2).unwrap(), 0);
    }

    #[test]
    fn weekly_pl_covers_the_latest_week_window() {
        // Latest record 2024-01-10 (Wed) -> week of Sun 01-07 .. Sat 01-13.
        let records = [
            day("2024-01-06", 999.0),
            day("2024-01-08", 100.0),
            day("2024-01-10", 50.0),
        ];
        assert_eq!(weekly_pl(&records).unwrap(), 150.0);
        assert_eq!(weekly_pl(&[]).unwrap(), 0.0);
    }

    #[test]
    fn latest_month_defaults_to_the_current_month() {
        let records = [day("2023-11-30", 1.0), day("2023-12-02", 1.0)];
        assert_eq!(latest_month(&records).unwrap(), (2023, 12));

        let today = Local::now().date_naive();
        assert_eq!(latest_month(&[]).unwrap(), (today.year(), today.month()));
    }
}
