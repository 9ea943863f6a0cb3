//! Core aggregate metrics over a journal.
//!
//! Every function here is pure: it takes a read-only slice of records (which
//! the caller may or may not have run through [`filter_outliers`] first) and
//! returns a freshly computed value. Degenerate inputs produce the
//! documented sentinel, never `NaN` and never a panic.

use crate::date::{self, chronological};
use crate::error::AnalyticsError;
use crate::math::{downside_deviation, mean, population_std_dev};
use crate::report::WinLossStreaks;
use core_types::DayRecord;

/// Records with a day P&L at or above this value are treated as data entry
/// outliers by the filtered statistics mode.
pub const OUTLIER_THRESHOLD: f64 = 10_000.0;

/// Annualization factor base: trading days per year.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Removes records whose `total_pl` is at or above [`OUTLIER_THRESHOLD`].
///
/// This is a policy knob, not a universal rule: raw attribution views are
/// computed on the unfiltered journal, so the caller composes this with the
/// aggregate functions explicitly.
pub fn filter_outliers(records: &[DayRecord]) -> Vec<DayRecord> {
    records
        .iter()
        .filter(|r| r.total_pl < OUTLIER_THRESHOLD)
        .cloned()
        .collect()
}

/// Sum of `total_pl` over all records. Order-independent.
pub fn cumulative_pl(records: &[DayRecord]) -> f64 {
    records.iter().map(|r| r.total_pl).sum()
}

/// Fraction of trading days (records with non-zero P&L) that were wins,
/// expressed as a percentage in `[0, 100]`. Zero-P&L days are excluded from
/// the denominator; a journal with no trading days reports 0.
pub fn win_rate(records: &[DayRecord]) -> f64 {
    let trading: Vec<&DayRecord> = records.iter().filter(|r| r.total_pl != 0.0).collect();
    if trading.is_empty() {
        return 0.0;
    }
    let wins = trading.iter().filter(|r| r.total_pl > 0.0).count();
    wins as f64 / trading.len() as f64 * 100.0
}

/// Cumulative P&L divided by the total stored trade count; 0 when no trades
/// have been recorded.
pub fn average_return_per_trade(records: &[DayRecord]) -> f64 {
    let total_trades: u64 = records.iter().map(|r| u64::from(r.number_of_trades)).sum();
    if total_trades == 0 {
        return 0.0;
    }
    cumulative_pl(records) / total_trades as f64
}

/// Maximum percent decline of the cumulative P&L from its running peak.
///
/// The divisor is `max(peak, 1)`: when the peak is still zero or negative
/// early in the series this is a floor, not a true percentage, and the
/// dashboard history depends on that exact behavior.
pub fn max_drawdown(records: &[DayRecord]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = 0.0f64;
    let mut max_dd = 0.0f64;

    for record in chronological(records) {
        cumulative += record.total_pl;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = (peak - cumulative) / peak.max(1.0) * 100.0;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }

    max_dd
}

/// Gross profit divided by gross loss magnitude. With no losses: `+∞` when
/// there is any profit, otherwise 0.
pub fn profit_factor(records: &[DayRecord]) -> f64 {
    let gross_profit: f64 = records
        .iter()
        .filter(|r| r.total_pl > 0.0)
        .map(|r| r.total_pl)
        .sum();
    let gross_loss: f64 = records
        .iter()
        .filter(|r| r.total_pl < 0.0)
        .map(|r| r.total_pl.abs())
        .sum();

    ratio_or_sentinel(gross_profit, gross_loss)
}

/// Annualized Sharpe ratio over the daily P&L values: mean over population
/// standard deviation, scaled by √252. Returns 0 for an empty journal or a
/// flat P&L series.
pub fn sharpe_ratio(records: &[DayRecord]) -> f64 {
    let pls: Vec<f64> = records.iter().map(|r| r.total_pl).collect();
    let Some(avg) = mean(&pls) else {
        return 0.0;
    };
    let Some(std) = population_std_dev(&pls) else {
        return 0.0;
    };
    if std == 0.0 {
        return 0.0;
    }
    avg / std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized Sortino ratio: like Sharpe, but the deviation denominator only
/// counts returns strictly below the mean (over the full sample size). With
/// no downside returns: `+∞` when the mean is positive, otherwise 0.
pub fn sortino_ratio(records: &[DayRecord]) -> f64 {
    let pls: Vec<f64> = records.iter().map(|r| r.total_pl).collect();
    let Some(avg) = mean(&pls) else {
        return 0.0;
    };
    let Some(downside) = downside_deviation(&pls) else {
        return 0.0;
    };
    if downside == 0.0 {
        return if avg > 0.0 { f64::INFINITY } else { 0.0 };
    }
    avg / downside * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Expected value per trading day:
/// `avg_win * win_rate - avg_loss_magnitude * loss_rate`, with the rates
/// taken over trading days only.
pub fn expectancy(records: &[DayRecord]) -> f64 {
    let (wins, losses) = split_trading_days(records);
    let trading = wins.len() + losses.len();
    if trading == 0 {
        return 0.0;
    }

    let win_rate = wins.len() as f64 / trading as f64;
    let loss_rate = losses.len() as f64 / trading as f64;
    let avg_win = mean(&wins).unwrap_or(0.0);
    let avg_loss = mean(&losses).unwrap_or(0.0).abs();

    (avg_win * win_rate) - (avg_loss * loss_rate)
}

/// Average win over average loss magnitude. With no losses: `+∞` when the
/// average win is positive, otherwise 0.
pub fn average_win_loss_ratio(records: &[DayRecord]) -> f64 {
    let (wins, losses) = split_trading_days(records);
    let avg_win = mean(&wins).unwrap_or(0.0);
    let avg_loss = mean(&losses).unwrap_or(0.0).abs();
    ratio_or_sentinel(avg_win, avg_loss)
}

/// The largest single-day profit; 0 when no day was profitable.
pub fn largest_win(records: &[DayRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl > 0.0)
        .fold(0.0, f64::max)
}

/// The largest single-day loss as a negative number; 0 when no day lost.
pub fn largest_loss(records: &[DayRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl < 0.0)
        .fold(0.0, f64::min)
}

/// Longest win/loss streaks and the streak active at the latest record.
///
/// Zero-P&L days are dropped entirely before streak segmentation, so a flat
/// day neither extends nor breaks a streak.
pub fn win_loss_streaks(records: &[DayRecord]) -> WinLossStreaks {
    let mut streaks = WinLossStreaks::default();
    let mut current_wins = 0u32;
    let mut current_losses = 0u32;
    let mut last_was_win = false;

    for record in chronological(records) {
        if record.total_pl > 0.0 {
            current_wins += 1;
            current_losses = 0;
            last_was_win = true;
            streaks.longest_win_streak = streaks.longest_win_streak.max(current_wins);
        } else if record.total_pl < 0.0 {
            current_losses += 1;
            current_wins = 0;
            last_was_win = false;
            streaks.longest_loss_streak = streaks.longest_loss_streak.max(current_losses);
        }
    }

    if current_wins > 0 || current_losses > 0 {
        streaks.current_streak = if last_was_win {
            current_wins as i32
        } else {
            -(current_losses as i32)
        };
    }

    streaks
}

/// Net profit over maximum drawdown percent. With no drawdown: `+∞` when the
/// journal is net profitable, otherwise 0.
pub fn recovery_factor(records: &[DayRecord]) -> f64 {
    let net = cumulative_pl(records);
    let drawdown = max_drawdown(records);
    ratio_or_sentinel(net, drawdown)
}

/// Average stored trade count per weekday record (Monday through Friday
/// only). Weekend entries are excluded from both sides of the division.
pub fn average_trades_per_day(records: &[DayRecord]) -> Result<f64, AnalyticsError> {
    let mut trades = 0u64;
    let mut days = 0u64;
    for record in records {
        let day = date::parse_date_key(&record.id)?;
        if date::is_weekday(day) {
            trades += u64::from(record.number_of_trades);
            days += 1;
        }
    }
    if days == 0 {
        return Ok(0.0);
    }
    Ok(trades as f64 / days as f64)
}

/// Win rate restricted to trading days with no falling-knife events (an
/// absent count means zero).
pub fn falling_knife_win_rate(records: &[DayRecord]) -> f64 {
    let disciplined: Vec<DayRecord> = records
        .iter()
        .filter(|r| r.falling_knives() == 0)
        .cloned()
        .collect();
    win_rate(&disciplined)
}

/// The `(positive numerator, zero denominator) → +∞` convention shared by the
/// ratio metrics; everything else degenerates to a plain division or 0.
fn ratio_or_sentinel(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator > 0.0 {
            return f64::INFINITY;
        }
        return 0.0;
    }
    numerator / denominator
}

/// The P&L values of winning and losing trading days, in input order.
fn split_trading_days(records: &[DayRecord]) -> (Vec<f64>, Vec<f64>) {
    let wins = records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl > 0.0)
        .collect();
    let losses = records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl < 0.0)
        .collect();
    (wins, losses)
}
