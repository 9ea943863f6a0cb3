//! Builders shared by the unit tests.

use core_types::{DayRecord, Trade};

/// A minimal record: one stored trade, no tags, no notes.
pub fn day(id: &str, total_pl: f64) -> DayRecord {
    DayRecord {
        id: id.to_string(),
        total_pl,
        trades: vec![],
        number_of_trades: 1,
        notes: String::new(),
        tags: vec![],
        falling_knives: None,
    }
}

/// A record with itemized trades; the stored count follows the list.
pub fn day_with_trades(id: &str, total_pl: f64, trades: &[(&str, f64)]) -> DayRecord {
    let mut record = day(id, total_pl);
    record.trades = trades
        .iter()
        .map(|(symbol, percent_return)| Trade {
            symbol: (*symbol).to_string(),
            percent_return: *percent_return,
        })
        .collect();
    record.number_of_trades = record.trades.len() as u32;
    record
}

/// A record carrying tags.
pub fn day_with_tags(id: &str, total_pl: f64, tags: &[&str]) -> DayRecord {
    let mut record = day(id, total_pl);
    record.tags = tags.iter().map(|t| (*t).to_string()).collect();
    record
}
