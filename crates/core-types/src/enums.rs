use serde::{Deserialize, Serialize};

/// The direction of a run of consecutive non-zero trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunKind {
    Win,
    Loss,
}

impl RunKind {
    /// Classifies a day's total P&L. Days with zero P&L belong to no run.
    pub fn of(total_pl: f64) -> Option<Self> {
        if total_pl > 0.0 {
            Some(RunKind::Win)
        } else if total_pl < 0.0 {
            Some(RunKind::Loss)
        } else {
            None
        }
    }
}
