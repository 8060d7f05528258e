//! Lower bound for the next status fetch

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Epoch seconds passed as `from_date`.
///
/// Starts at `now - lookback`; afterwards only the server's `current_date`
/// moves it, so items already reported are not fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(i64);

impl Checkpoint {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    /// Checkpoint `lookback` before `now`
    pub fn initial(now: SystemTime, lookback: Duration) -> Self {
        let now = now.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
        let now = i64::try_from(now).unwrap_or(i64::MAX);
        let lookback = i64::try_from(lookback.as_secs()).unwrap_or(i64::MAX);
        Self(now.saturating_sub(lookback))
    }

    /// Checkpoint `lookback_days` before the current time
    pub fn lookback_days(days: u64) -> Self {
        let lookback = Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY));
        Self::initial(SystemTime::now(), lookback)
    }

    pub fn from_date(self) -> i64 {
        self.0
    }

    /// Move to the server-supplied `current_date`
    pub fn advance(&mut self, current_date: i64) {
        self.0 = current_date;
    }
}
