//! # Daybook Statistics Engine
//!
//! This crate derives portfolio performance statistics from a collection of
//! daily trading-journal records. It acts as the "unbiased judge" of the
//! journal: every number on the dashboard comes out of here.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** no I/O, no hidden state, no knowledge of where the
//!   records came from. It depends only on `core-types`.
//! - **Stateless calculation:** every function takes a read-only slice of
//!   `DayRecord` (plus scalar parameters) and returns newly constructed
//!   results. Same input, same output.
//! - **Sentinels over panics:** degenerate statistical inputs (empty
//!   collections, zero denominators) produce `0.0` or `f64::INFINITY`
//!   according to each metric's convention, never `NaN` and never a panic.
//!
//! ## Public API
//!
//! - `StatsEngine` / `StatsReport`: the one-call aggregate report.
//! - The per-metric functions in [`metrics`], [`grouping`], [`series`], and
//!   [`risk`] for callers that need a single value or series.
//! - `AnalyticsError`: the specific error type for malformed date keys.

pub mod date;
pub mod engine;
pub mod error;
pub mod format;
pub mod grouping;
pub mod math;
pub mod metrics;
pub mod report;
pub mod risk;
pub mod series;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatsEngine;
pub use error::AnalyticsError;
pub use report::{
    DayOfWeekPL, DrawdownPoint, MonthlyReturn, RMultipleAnalysis, RMultiplePoint, ReturnBin,
    ReturnDistribution, RiskMetrics, RollingPoint, StatsReport, TagPL, TickerPL, VolatilityPoint,
    WinLossRun, WinLossStreaks,
};
