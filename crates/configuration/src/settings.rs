use core_types::UserSettings;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub journal: Journal,
    pub account: Account,
    pub stats: Stats,
}

/// Where the journal lives on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Journal {
    /// Path to the JSON journal file (an array of day records).
    pub path: String,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            path: "journal.json".to_string(),
        }
    }
}

/// Account-level scalars passed through to display adjustments.
///
/// The statistics engine never reads these; they belong to the caller.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Account {
    pub net_worth: f64,
    pub starting_balance: f64,
}

impl Account {
    pub fn user_settings(&self) -> UserSettings {
        UserSettings {
            net_worth: self.net_worth,
            starting_balance: self.starting_balance,
        }
    }
}

/// Knobs for the statistics views.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Trailing-window size for the rolling and volatility series.
    pub rolling_window: usize,
    /// Whether the aggregate report runs on the outlier-filtered journal.
    pub filter_outliers: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            rolling_window: 20,
            filter_outliers: true,
        }
    }
}
