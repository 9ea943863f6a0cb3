use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trade taken during a journal day.
///
/// The per-trade return is entered by the user as a percentage and carries no
/// enforced relationship to the day's `total_pl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Short uppercase ticker symbol (e.g., "AAPL").
    pub symbol: String,
    /// Signed percentage return for this trade.
    pub percent_return: f64,
}

/// One user-entered row of trading activity for a single calendar date.
///
/// The `id` doubles as the chronological sort key: it is a zero-padded
/// `YYYY-MM-DD` string, so lexicographic order equals date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Date key in `YYYY-MM-DD` form, unique within a journal.
    pub id: String,

    /// The day's total profit/loss in currency units. Entered independently
    /// of the per-trade returns; a value of exactly zero marks a
    /// non-trading day for win/loss purposes.
    #[serde(rename = "totalPL")]
    pub total_pl: f64,

    /// The trades taken that day, in entry order.
    #[serde(default)]
    pub trades: Vec<Trade>,

    /// Trade count as entered by the user. Stored independently of
    /// `trades.len()`; the writer is responsible for keeping them in sync.
    pub number_of_trades: u32,

    /// Free-text notes. Never consumed by the statistics engine.
    #[serde(default)]
    pub notes: String,

    /// Free-text labels attached to the day.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Count of falling-knife events for the day. Absent means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falling_knives: Option<u32>,
}

impl DayRecord {
    /// The falling-knife count with the absent-means-zero coercion applied.
    pub fn falling_knives(&self) -> u32 {
        self.falling_knives.unwrap_or(0)
    }

    /// Parses the record's date key into a calendar date.
    pub fn date(&self) -> Result<NaiveDate, CoreError> {
        NaiveDate::parse_from_str(&self.id, "%Y-%m-%d").map_err(|_| CoreError::InvalidRecord {
            id: self.id.clone(),
            reason: "date key is not in YYYY-MM-DD form".to_string(),
        })
    }

    /// Checks the invariants a writer is expected to uphold.
    ///
    /// Only the date-key format is a hard error; a `number_of_trades` that
    /// disagrees with `trades.len()` is reported separately via
    /// [`DayRecord::trade_count_consistent`] so callers can decide whether
    /// to warn or reject.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.date().map(|_| ())
    }

    /// Whether the stored trade count matches the trade list.
    ///
    /// Records with an empty trade list are considered consistent: users may
    /// enter a bare count without itemizing trades.
    pub fn trade_count_consistent(&self) -> bool {
        self.trades.is_empty() || self.number_of_trades as usize == self.trades.len()
    }
}

/// Account-level scalars supplied by the settings store.
///
/// These are opaque adjustment inputs owned by the caller; the statistics
/// engine never reads or writes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub net_worth: f64,
    pub starting_balance: f64,
}
