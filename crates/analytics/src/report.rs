use core_types::RunKind;
use serde::{Deserialize, Serialize};

/// Longest and current win/loss streaks over the non-zero trading days.
///
/// `current_streak` is signed: a positive value is an active win streak, a
/// negative value an active loss streak ending at the most recent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinLossStreaks {
    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,
    pub current_streak: i32,
}

/// Per-symbol P&L attribution, with the day's total split evenly across its
/// trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPL {
    pub symbol: String,
    pub total_pl: f64,
    pub trades: u32,
}

/// P&L summed into one of the seven weekday buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekPL {
    pub day: String,
    pub total_pl: f64,
}

/// P&L attributed to a tag. A multi-tag day contributes its full P&L to every
/// one of its tags; this is attribution, not a partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagPL {
    pub tag: String,
    pub total_pl: f64,
    pub days: u32,
}

/// A half-open histogram bin `[lower, upper)` of per-trade percent returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Every per-trade percent return across the journal, with 5-point-wide
/// histogram bins spanning the value range (always including zero).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnDistribution {
    pub returns: Vec<f64>,
    pub bins: Vec<ReturnBin>,
}

/// One step of the rolling-metrics walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub date: String,
    pub cumulative_pl: f64,
    pub window_avg_pl: f64,
    pub window_win_rate: f64,
}

/// One step of the drawdown series: percent decline from the running peak and
/// the dollar amount below it (zero at a fresh peak, negative underwater).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub date: String,
    pub drawdown_pct: f64,
    pub underwater: f64,
}

/// Aggregates for one (year, month) bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    pub year: i32,
    pub month: u32,
    pub total_pl: f64,
    pub trades: u32,
    pub win_rate: f64,
}

/// Annualized rolling volatility at one record, emitted only once a full
/// trailing window is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub date: String,
    pub volatility: f64,
}

/// A maximal run of consecutive same-signed non-zero days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossRun {
    pub kind: RunKind,
    pub length: u32,
}

/// A day's outcome expressed as a multiple of the average loss magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RMultiplePoint {
    pub date: String,
    pub r_multiple: f64,
}

/// R-multiple summary. By convention the average loss is the unit, so
/// `avg_loss_r` is the constant `-1.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RMultipleAnalysis {
    pub r_multiples: Vec<RMultiplePoint>,
    pub avg_win_r: f64,
    pub avg_loss_r: f64,
}

/// Historical value-at-risk estimates over the day-level P&L distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub value_at_risk_95: f64,
    pub value_at_risk_99: f64,
    pub conditional_var_95: f64,
}

/// A comprehensive, standardized report of the journal's performance.
///
/// This struct is the final output of the `StatsEngine` and serves as the
/// data transfer object for the dashboard layer. Ratio fields use the engine's
/// sentinel conventions: `0.0` for degenerate inputs and `f64::INFINITY` when
/// a zero denominator meets a strictly positive numerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    // I. Core profitability
    pub cumulative_pl: f64,
    pub average_return_per_trade: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
    pub average_win_loss_ratio: f64,

    // II. Risk and drawdown
    pub max_drawdown_pct: f64,
    pub recovery_factor: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub risk: RiskMetrics,

    // III. Day-level statistics
    pub total_days: usize,
    pub trading_days: usize,
    pub win_rate_pct: f64,
    pub streaks: WinLossStreaks,
    pub average_trades_per_day: f64,
    pub falling_knife_win_rate_pct: f64,

    // IV. Calendar
    pub weekly_pl: f64,
}

impl StatsReport {
    /// Creates a new, zeroed-out StatsReport.
    /// This is the value reported for an empty journal.
    pub fn new() -> Self {
        Self {
            cumulative_pl: 0.0,
            average_return_per_trade: 0.0,
            largest_win: 0.0,
            largest_loss: 0.0,
            profit_factor: 0.0,
            expectancy: 0.0,
            average_win_loss_ratio: 0.0,
            max_drawdown_pct: 0.0,
            recovery_factor: 0.0,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            calmar_ratio: 0.0,
            risk: RiskMetrics::default(),
            total_days: 0,
            trading_days: 0,
            win_rate_pct: 0.0,
            streaks: WinLossStreaks::default(),
            average_trades_per_day: 0.0,
            falling_knife_win_rate_pct: 0.0,
            weekly_pl: 0.0,
        }
    }
}

impl Default for StatsReport {
    fn default() -> Self {
        Self::new()
    }
}
