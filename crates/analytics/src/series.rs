//! Chronological point series for the dashboard charts.

use crate::date::{self, chronological};
use crate::error::AnalyticsError;
use crate::math::population_std_dev;
use crate::metrics::TRADING_DAYS_PER_YEAR;
use crate::report::{DrawdownPoint, MonthlyReturn, RollingPoint, VolatilityPoint, WinLossRun};
use core_types::{DayRecord, RunKind};
use std::collections::BTreeMap;

/// Default trailing-window size for the rolling and volatility series.
pub const DEFAULT_WINDOW: usize = 20;

/// Walks the journal chronologically emitting, at every record, the
/// cumulative P&L to date plus the average P&L and win rate over the trailing
/// `window` records. The window is clipped at the start of the series, so the
/// early points average over fewer days.
pub fn rolling_metrics(records: &[DayRecord], window: usize) -> Vec<RollingPoint> {
    let window = window.max(1);
    let ordered = chronological(records);
    let mut points = Vec::with_capacity(ordered.len());
    let mut cumulative = 0.0;

    for (i, record) in ordered.iter().enumerate() {
        cumulative += record.total_pl;

        let start = (i + 1).saturating_sub(window);
        let slice = &ordered[start..=i];
        let window_avg_pl =
            slice.iter().map(|r| r.total_pl).sum::<f64>() / slice.len() as f64;

        let trading = slice.iter().filter(|r| r.total_pl != 0.0).count();
        let wins = slice.iter().filter(|r| r.total_pl > 0.0).count();
        let window_win_rate = if trading == 0 {
            0.0
        } else {
            wins as f64 / trading as f64 * 100.0
        };

        points.push(RollingPoint {
            date: record.id.clone(),
            cumulative_pl: cumulative,
            window_avg_pl,
            window_win_rate,
        });
    }

    points
}

/// Per-record drawdown series using the same peak walk as the max-drawdown
/// metric, but emitting every step. The percent column is 0 while the running
/// peak is non-positive (the division is guarded directly, with no floor);
/// `underwater` is the dollar distance below the peak, zero at fresh peaks.
pub fn drawdown_series(records: &[DayRecord]) -> Vec<DrawdownPoint> {
    let ordered = chronological(records);
    let mut points = Vec::with_capacity(ordered.len());
    let mut cumulative = 0.0;
    let mut peak = 0.0f64;

    for record in ordered {
        cumulative += record.total_pl;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown_pct = if peak > 0.0 {
            (peak - cumulative) / peak * 100.0
        } else {
            0.0
        };
        points.push(DrawdownPoint {
            date: record.id.clone(),
            drawdown_pct,
            underwater: cumulative - peak,
        });
    }

    points
}

/// Groups records by (year, month), summing P&L and trade counts and
/// computing the per-month win rate (zero-P&L days excluded from the
/// denominator, as everywhere). Ascending by month key.
pub fn monthly_returns(records: &[DayRecord]) -> Result<Vec<MonthlyReturn>, AnalyticsError> {
    // BTreeMap keeps the month keys ascending for free.
    let mut buckets: BTreeMap<(i32, u32), (f64, u32, u32, u32)> = BTreeMap::new();

    for record in records {
        let key = date::month_key(&record.id)?;
        let bucket = buckets.entry(key).or_insert((0.0, 0, 0, 0));
        bucket.0 += record.total_pl;
        bucket.1 += record.number_of_trades;
        if record.total_pl > 0.0 {
            bucket.2 += 1;
        }
        if record.total_pl != 0.0 {
            bucket.3 += 1;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|((year, month), (total_pl, trades, wins, trading))| MonthlyReturn {
            year,
            month,
            total_pl,
            trades,
            win_rate: if trading == 0 {
                0.0
            } else {
                f64::from(wins) / f64::from(trading) * 100.0
            },
        })
        .collect())
}

/// Rolling population standard deviation of the daily P&L, annualized by
/// √252. Unlike [`rolling_metrics`], nothing is emitted until a full trailing
/// window is available.
pub fn volatility_series(records: &[DayRecord], window: usize) -> Vec<VolatilityPoint> {
    let window = window.max(1);
    let ordered = chronological(records);
    if ordered.len() < window {
        return Vec::new();
    }

    let pls: Vec<f64> = ordered.iter().map(|r| r.total_pl).collect();
    let mut points = Vec::with_capacity(ordered.len() - window + 1);

    for i in (window - 1)..ordered.len() {
        let slice = &pls[i + 1 - window..=i];
        let std = population_std_dev(slice).unwrap_or(0.0);
        points.push(VolatilityPoint {
            date: ordered[i].id.clone(),
            volatility: std * TRADING_DAYS_PER_YEAR.sqrt(),
        });
    }

    points
}

/// Maximal runs of consecutive same-signed non-zero days, in chronological
/// order. Zero-P&L days are dropped before segmenting.
pub fn win_loss_runs(records: &[DayRecord]) -> Vec<WinLossRun> {
    let mut runs: Vec<WinLossRun> = Vec::new();

    for record in chronological(records) {
        let Some(kind) = RunKind::of(record.total_pl) else {
            continue;
        };
        match runs.last_mut() {
            Some(run) if run.kind == kind => run.length += 1,
            _ => runs.push(WinLossRun { kind, length: 1 }),
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::day;

    #[test]
    fn rolling_metrics_clip_the_leading_window() {
        let records = [
            day("2024-01-01", 10.0),
            day("2024-01-02", -10.0),
            day("2024-01-03", 30.0),
        ];
        let points = rolling_metrics(&records, 2);
        assert_eq!(points.len(), 3);

        // First point sees only itself.
        assert_eq!(points[0].cumulative_pl, 10.0);
        assert_eq!(points[0].window_avg_pl, 10.0);
        assert_eq!(points[0].window_win_rate, 100.0);

        // Second point: window [10, -10].
        assert_eq!(points[1].cumulative_pl, 0.0);
        assert_eq!(points[1].window_avg_pl, 0.0);
        assert_eq!(points[1].window_win_rate, 50.0);

        // Third point: window [-10, 30].
        assert_eq!(points[2].cumulative_pl, 30.0);
        assert_eq!(points[2].window_avg_pl, 10.0);
        assert_eq!(points[2].window_win_rate, 50.0);
    }

    #[test]
    fn rolling_metrics_sort_unordered_input() {
        let records = [day("2024-01-02", -5.0), day("2024-01-01", 10.0)];
        let points = rolling_metrics(&records, DEFAULT_WINDOW);
        assert_eq!(points[0].date, "2024-01-01");
        assert_eq!(points[1].cumulative_pl, 5.0);
    }

    #[test]
    fn drawdown_series_emits_every_step() {
        let records = [
            day("2024-01-01", -50.0),
            day("2024-01-02", 150.0),
            day("2024-01-03", -25.0),
        ];
        let points = drawdown_series(&records);
        assert_eq!(points.len(), 3);

        // Peak is still 0 after the first losing day: no percent, only dollars.
        assert_eq!(points[0].drawdown_pct, 0.0);
        assert_eq!(points[0].underwater, -50.0);

        // Fresh peak at 100.
        assert_eq!(points[1].drawdown_pct, 0.0);
        assert_eq!(points[1].underwater, 0.0);

        // 100 -> 75 is a 25% decline.
        assert!((points[2].drawdown_pct - 25.0).abs() < 1e-12);
        assert_eq!(points[2].underwater, -25.0);
    }

    #[test]
    fn monthly_returns_bucket_and_sort_by_month() {
        let records = [
            day("2024-02-01", 500.0),
            day("2024-01-10", 40.0),
            day("2024-01-20", -10.0),
            day("2024-01-25", 0.0),
        ];
        let months = monthly_returns(&records).unwrap();
        assert_eq!(months.len(), 2);

        assert_eq!((months[0].year, months[0].month), (2024, 1));
        assert_eq!(months[0].total_pl, 30.0);
        assert_eq!(months[0].trades, 3);
        // One win of two trading days; the zero day is excluded.
        assert_eq!(months[0].win_rate, 50.0);

        assert_eq!((months[1].year, months[1].month), (2024, 2));
        assert_eq!(months[1].win_rate, 100.0);
    }

    #[test]
    fn volatility_series_requires_a_full_window() {
        let records = [
            day("2024-01-01", 10.0),
            day("2024-01-02", 20.0),
            day("2024-01-03", 10.0),
        ];
        let points = volatility_series(&records, 2);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2024-01-02");

        // Population std dev of [10, 20] is 5.
        let expected = 5.0 * 252.0f64.sqrt();
        assert!((points[0].volatility - expected).abs() < 1e-9);

        assert!(volatility_series(&records, 4).is_empty());
    }

    #[test]
    fn runs_segment_same_signed_days() {
        let records = [
            day("2024-01-01", 100.0),
            day("2024-01-02", 50.0),
            day("2024-01-03", -30.0),
            day("2024-01-04", 0.0),
            day("2024-01-05", -10.0),
            day("2024-01-06", 20.0),
        ];
        let runs = win_loss_runs(&records);
        assert_eq!(
            runs,
            vec![
                WinLossRun { kind: RunKind::Win, length: 2 },
                WinLossRun { kind: RunKind::Loss, length: 2 },
                WinLossRun { kind: RunKind::Win, length: 1 },
            ]
        );
        assert!(win_loss_runs(&[]).is_empty());
    }
}
