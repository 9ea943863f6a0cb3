use crate::error::AnalyticsError;
use crate::report::StatsReport;
use crate::{grouping, metrics, risk};
use core_types::DayRecord;
use tracing::debug;

/// A stateless calculator that derives the full scalar report from a journal.
///
/// Callers who want outlier-filtered statistics run the slice through
/// [`metrics::filter_outliers`] first; the engine itself applies no implicit
/// filtering.
#[derive(Debug, Default)]
pub struct StatsEngine {}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every scalar metric over the given records.
    ///
    /// An empty journal produces the zeroed default report. The only error
    /// case is a record whose date key is not in `YYYY-MM-DD` form.
    pub fn calculate(&self, records: &[DayRecord]) -> Result<StatsReport, AnalyticsError> {
        debug!(records = records.len(), "calculating statistics report");

        if records.is_empty() {
            return Ok(StatsReport::new());
        }

        let mut report = StatsReport::new();
        self.calculate_profitability(records, &mut report);
        self.calculate_risk(records, &mut report);
        self.calculate_day_stats(records, &mut report)?;
        report.weekly_pl = grouping::weekly_pl(records)?;

        Ok(report)
    }

    fn calculate_profitability(&self, records: &[DayRecord], report: &mut StatsReport) {
        report.cumulative_pl = metrics::cumulative_pl(records);
        report.average_return_per_trade = metrics::average_return_per_trade(records);
        report.largest_win = metrics::largest_win(records);
        report.largest_loss = metrics::largest_loss(records);
        report.profit_factor = metrics::profit_factor(records);
        report.expectancy = metrics::expectancy(records);
        report.average_win_loss_ratio = metrics::average_win_loss_ratio(records);
    }

    fn calculate_risk(&self, records: &[DayRecord], report: &mut StatsReport) {
        report.max_drawdown_pct = metrics::max_drawdown(records);
        report.recovery_factor = metrics::recovery_factor(records);
        report.sharpe_ratio = metrics::sharpe_ratio(records);
        report.sortino_ratio = metrics::sortino_ratio(records);
        report.calmar_ratio = risk::calmar_ratio(records);
        report.risk = risk::risk_metrics(records);
    }

    fn calculate_day_stats(
        &self,
        records: &[DayRecord],
        report: &mut StatsReport,
    ) -> Result<(), AnalyticsError> {
        report.total_days = records.len();
        report.trading_days = records.iter().filter(|r| r.total_pl != 0.0).count();
        report.win_rate_pct = metrics::win_rate(records);
        report.streaks = metrics::win_loss_streaks(records);
        report.average_trades_per_day = metrics::average_trades_per_day(records)?;
        report.falling_knife_win_rate_pct = metrics::falling_knife_win_rate(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::day;

    #[test]
    fn empty_journal_yields_the_zeroed_report() {
        let report = StatsEngine::new().calculate(&[]).unwrap();
        assert_eq!(report, StatsReport::new());
    }

    #[test]
    fn report_agrees_with_the_individual_metrics() {
        let records = [
            day("2024-01-08", 100.0),
            day("2024-01-09", -50.0),
            day("2024-01-10", 0.0),
            day("2024-01-11", 25.0),
        ];
        let report = StatsEngine::new().calculate(&records).unwrap();

        assert_eq!(report.cumulative_pl, metrics::cumulative_pl(&records));
        assert_eq!(report.win_rate_pct, metrics::win_rate(&records));
        assert_eq!(report.max_drawdown_pct, metrics::max_drawdown(&records));
        assert_eq!(report.profit_factor, metrics::profit_factor(&records));
        assert_eq!(report.total_days, 4);
        assert_eq!(report.trading_days, 3);
        assert_eq!(report.risk, risk::risk_metrics(&records));
        assert_eq!(report.weekly_pl, 75.0);
    }

    #[test]
    fn repeated_calculation_is_identical() {
        let records = [
            day("2024-01-01", 10.0),
            day("2024-01-02", -20.0),
            day("2024-01-03", 15.0),
        ];
        let engine = StatsEngine::new();
        let first = engine.calculate(&records).unwrap();
        let second = engine.calculate(&records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_date_keys_surface_as_errors() {
        let records = [day("not-a-date", 10.0)];
        assert!(StatsEngine::new().calculate(&records).is_err());
    }
}
