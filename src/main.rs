use analytics::{StatsEngine, format, grouping, metrics, risk, series};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::DayRecord;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Daybook journal statistics application.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match configuration::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Report(args) => handle_report(&cli.journal, args, &config),
        Commands::Month(args) => handle_month(&cli.journal, args, &config),
        Commands::Months => handle_months(&cli.journal, &config),
        Commands::Tickers => handle_tickers(&cli.journal, &config),
        Commands::Tags => handle_tags(&cli.journal, &config),
        Commands::Export(args) => handle_export(&cli.journal, args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance statistics for a daily trading journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON journal file (overrides the configured path).
    #[arg(long, global = true)]
    journal: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full statistics report.
    Report(ReportArgs),
    /// Print the P&L summary for one calendar month.
    Month(MonthArgs),
    /// Print the month-by-month return table.
    Months,
    /// Print per-ticker P&L attribution.
    Tickers,
    /// Print per-tag P&L attribution.
    Tags,
    /// Dump the report and every chart series as JSON.
    Export(ExportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Compute over the raw journal, skipping the outlier filter.
    #[arg(long)]
    raw: bool,
}

#[derive(Parser)]
struct MonthArgs {
    /// The month to summarize (format: YYYY-MM). Defaults to the latest
    /// month with data.
    month: Option<String>,
}

#[derive(Parser)]
struct ExportArgs {
    /// Export the raw journal, skipping the outlier filter.
    #[arg(long)]
    raw: bool,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Reads and validates the journal the statistics run over.
fn load_journal(
    journal_override: &Option<String>,
    config: &Config,
) -> anyhow::Result<Vec<DayRecord>> {
    let path = journal_override
        .clone()
        .unwrap_or_else(|| config.journal.path.clone());

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read journal file '{path}'"))?;
    let records: Vec<DayRecord> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse journal '{path}'"))?;

    for record in &records {
        record
            .validate()
            .with_context(|| format!("journal '{path}' contains an invalid record"))?;
        if !record.trade_count_consistent() {
            warn!(
                id = %record.id,
                stored = record.number_of_trades,
                listed = record.trades.len(),
                "stored trade count disagrees with the trade list"
            );
        }
    }

    info!(records = records.len(), path = %path, "journal loaded");
    Ok(records)
}

/// Renders a two-column metric table.
fn print_metric_table(rows: Vec<(&str, String)>) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    println!("{table}");
}

fn handle_report(
    journal: &Option<String>,
    args: ReportArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let mut records = load_journal(journal, config)?;
    if !args.raw && config.stats.filter_outliers {
        let before = records.len();
        records = metrics::filter_outliers(&records);
        if records.len() < before {
            info!(dropped = before - records.len(), "outlier records excluded");
        }
    }

    let report = StatsEngine::new().calculate(&records)?;
    let settings = config.account.user_settings();

    let mut rows = vec![
        ("Days recorded", report.total_days.to_string()),
        ("Trading days", report.trading_days.to_string()),
        ("Cumulative P&L", format::format_currency(report.cumulative_pl)),
        ("Win rate", format::format_percent(report.win_rate_pct)),
        (
            "Avg return per trade",
            format::format_currency(report.average_return_per_trade),
        ),
        ("Max drawdown", format::format_percent(report.max_drawdown_pct)),
        ("Profit factor", format::format_ratio(report.profit_factor)),
        ("Sharpe ratio", format::format_ratio(report.sharpe_ratio)),
        ("Sortino ratio", format::format_ratio(report.sortino_ratio)),
        ("Calmar ratio", format::format_ratio(report.calmar_ratio)),
        ("Recovery factor", format::format_ratio(report.recovery_factor)),
        ("Expectancy", format::format_currency(report.expectancy)),
        (
            "Avg win / avg loss",
            format::format_ratio(report.average_win_loss_ratio),
        ),
        ("Largest win", format::format_currency(report.largest_win)),
        ("Largest loss", format::format_currency(report.largest_loss)),
        (
            "Longest win streak",
            report.streaks.longest_win_streak.to_string(),
        ),
        (
            "Longest loss streak",
            report.streaks.longest_loss_streak.to_string(),
        ),
        ("Current streak", report.streaks.current_streak.to_string()),
        (
            "Avg trades per weekday",
            format!("{:.2}", report.average_trades_per_day),
        ),
        (
            "Falling-knife-free win rate",
            format::format_percent(report.falling_knife_win_rate_pct),
        ),
        ("This week's P&L", format::format_currency(report.weekly_pl)),
        ("VaR 95%", format::format_currency(report.risk.value_at_risk_95)),
        ("VaR 99%", format::format_currency(report.risk.value_at_risk_99)),
        (
            "CVaR 95%",
            format::format_currency(report.risk.conditional_var_95),
        ),
    ];

    // Account-level adjustments live in the display layer, not the engine.
    if settings.net_worth != 0.0 {
        rows.push((
            "Adjusted net worth",
            format::format_currency(settings.net_worth + report.cumulative_pl),
        ));
    }
    if settings.starting_balance > 0.0 {
        rows.push((
            "Return on starting balance",
            format::format_percent(report.cumulative_pl / settings.starting_balance * 100.0),
        ));
    }

    print_metric_table(rows);
    Ok(())
}

fn handle_months(journal: &Option<String>, config: &Config) -> anyhow::Result<()> {
    let records = load_journal(journal, config)?;
    let months = series::monthly_returns(&records)?;

    let mut table = Table::new();
    table.set_header(vec!["Month", "P&L", "Trades", "Win rate"]);
    for month in &months {
        table.add_row(vec![
            format!("{}-{:02}", month.year, month.month),
            format::format_currency(month.total_pl),
            month.trades.to_string(),
            format::format_percent(month.win_rate),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn handle_export(
    journal: &Option<String>,
    args: ExportArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let raw_records = load_journal(journal, config)?;
    let records = if !args.raw && config.stats.filter_outliers {
        metrics::filter_outliers(&raw_records)
    } else {
        raw_records.clone()
    };
    let window = config.stats.rolling_window;

    let report = StatsEngine::new().calculate(&records)?;
    let payload = serde_json::json!({
        "report": report,
        "rolling_metrics": series::rolling_metrics(&records, window),
        "drawdown_series": series::drawdown_series(&records),
        "monthly_returns": series::monthly_returns(&records)?,
        "volatility_series": series::volatility_series(&records, window),
        "win_loss_runs": series::win_loss_runs(&records),
        "r_multiples": risk::r_multiple_analysis(&records),
        "pl_by_ticker": grouping::pl_by_ticker(&raw_records),
        "pl_by_tag": grouping::pl_by_tag(&raw_records),
        "pl_by_day_of_week": grouping::pl_by_day_of_week(&records)?,
        "return_distribution": grouping::return_distribution(&records),
    });

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn handle_month(
    journal: &Option<String>,
    args: MonthArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let records = load_journal(journal, config)?;

    let (year, month) = match args.month {
        Some(selector) => parse_month(&selector)?,
        None => grouping::latest_month(&records)?,
    };

    let pl = grouping::monthly_pl(&records, year, month)?;
    let knives = grouping::monthly_falling_knives(&records, year, month)?;

    print_metric_table(vec![
        ("Month", format!("{year}-{month:02}")),
        ("Total P&L", format::format_currency(pl)),
        ("Falling knives", knives.to_string()),
    ]);
    Ok(())
}

fn handle_tickers(journal: &Option<String>, config: &Config) -> anyhow::Result<()> {
    // Attribution views run on the raw journal so big days stay visible.
    let records = load_journal(journal, config)?;
    let attribution = grouping::pl_by_ticker(&records);

    let mut table = Table::new();
    table.set_header(vec!["Symbol", "P&L", "Trades"]);
    for row in &attribution {
        table.add_row(vec![
            row.symbol.clone(),
            format::format_currency(row.total_pl),
            row.trades.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn handle_tags(journal: &Option<String>, config: &Config) -> anyhow::Result<()> {
    let records = load_journal(journal, config)?;
    let attribution = grouping::pl_by_tag(&records);

    let mut table = Table::new();
    table.set_header(vec!["Tag", "P&L", "Days"]);
    for row in &attribution {
        table.add_row(vec![
            row.tag.clone(),
            format::format_currency(row.total_pl),
            row.days.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Parses a `YYYY-MM` month selector.
fn parse_month(selector: &str) -> anyhow::Result<(i32, u32)> {
    let (year, month) = selector
        .split_once('-')
        .with_context(|| format!("invalid month '{selector}': expected YYYY-MM"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid year in '{selector}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid month in '{selector}'"))?;
    anyhow::ensure!((1..=12).contains(&month), "month must be 1-12, got {month}");
    Ok((year, month))
}
