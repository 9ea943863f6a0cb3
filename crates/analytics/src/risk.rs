//! Tail-risk and risk-unit metrics.

use crate::date::chronological;
use crate::math::mean;
use crate::metrics::{self, TRADING_DAYS_PER_YEAR};
use crate::report::{RMultipleAnalysis, RMultiplePoint, RiskMetrics};
use core_types::DayRecord;
use std::cmp::Ordering;

/// Calmar ratio: the annualized-return estimate (`mean daily P&L × 252`)
/// over the maximum drawdown percent. With no drawdown: `+∞` when the
/// estimate is positive, otherwise 0.
pub fn calmar_ratio(records: &[DayRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let annualized = metrics::cumulative_pl(records) / records.len() as f64 * TRADING_DAYS_PER_YEAR;
    let drawdown = metrics::max_drawdown(records);
    if drawdown == 0.0 {
        if annualized > 0.0 {
            return f64::INFINITY;
        }
        return 0.0;
    }
    annualized / drawdown
}

/// Expresses every day's P&L as a multiple of the average loss magnitude
/// (the unit "R"). `avg_loss_r` is the constant `-1.0` by definition;
/// `avg_win_r` is the average win in R units. With no loss history the unit
/// is undefined: the point series is empty and `avg_win_r` falls back to the
/// usual zero-denominator sentinel.
pub fn r_multiple_analysis(records: &[DayRecord]) -> RMultipleAnalysis {
    let losses: Vec<f64> = records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl < 0.0)
        .collect();
    let wins: Vec<f64> = records
        .iter()
        .map(|r| r.total_pl)
        .filter(|pl| *pl > 0.0)
        .collect();
    let avg_win = mean(&wins).unwrap_or(0.0);
    let avg_loss = mean(&losses).unwrap_or(0.0).abs();

    if avg_loss == 0.0 {
        return RMultipleAnalysis {
            r_multiples: Vec::new(),
            avg_win_r: if avg_win > 0.0 { f64::INFINITY } else { 0.0 },
            avg_loss_r: -1.0,
        };
    }

    let r_multiples = chronological(records)
        .into_iter()
        .map(|record| RMultiplePoint {
            date: record.id.clone(),
            r_multiple: record.total_pl / avg_loss,
        })
        .collect();

    RMultipleAnalysis {
        r_multiples,
        avg_win_r: avg_win / avg_loss,
        avg_loss_r: -1.0,
    }
}

/// Historical value-at-risk over the day-level P&L distribution.
///
/// Records are sorted ascending by `total_pl` (not by date); the 95%/99%
/// VaR is the value at index `floor(n × 0.05)` / `floor(n × 0.01)`, and the
/// conditional VaR95 is the mean of the left tail at or below the 95% index.
pub fn risk_metrics(records: &[DayRecord]) -> RiskMetrics {
    if records.is_empty() {
        return RiskMetrics::default();
    }

    let mut pls: Vec<f64> = records.iter().map(|r| r.total_pl).collect();
    pls.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = pls.len();
    let idx_95 = ((n as f64 * 0.05).floor() as usize).min(n - 1);
    let idx_99 = ((n as f64 * 0.01).floor() as usize).min(n - 1);

    RiskMetrics {
        value_at_risk_95: pls[idx_95],
        value_at_risk_99: pls[idx_99],
        conditional_var_95: mean(&pls[..=idx_95]).unwrap_or(0.0),
    }
}
