//! Generation clock — owns the anchor "now" every order time is derived from.

use crate::types::Timestamp;
use chrono::{Duration, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenClock {
    pub anchor: Timestamp,
}

impl GenClock {
    /// Anchor at the current local wall-clock time, truncated to whole seconds.
    pub fn system() -> Self {
        let now = Local::now().naive_local();
        Self::fixed(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Anchor at an explicit instant. Tests and reproducible runs use this.
    pub fn fixed(anchor: Timestamp) -> Self {
        Self { anchor }
    }

    /// Window order times are drawn from: `[anchor - lookback, anchor - min_age]`.
    pub fn order_window(&self, lookback_days: i64, min_age_days: i64) -> (Timestamp, Timestamp) {
        (
            self.anchor - Duration::days(lookback_days),
            self.anchor - Duration::days(min_age_days),
        )
    }

    pub fn today(&self) -> NaiveDate {
        self.anchor.date()
    }
}
