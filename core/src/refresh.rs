//! Recomputation schedule for cached dashboards.
//!
//! The calculator never sleeps or polls. A caller that keeps a cached
//! dashboard asks `is_due` and recomputes from a fresh snapshot.

use crate::{
    config::RefreshConfig,
    error::{SatResult, SaturationError},
};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval: Duration,
}

impl RefreshPolicy {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_config(config: &RefreshConfig) -> SatResult<Self> {
        let secs = config.interval_secs;
        let interval = i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(SaturationError::InvalidRefreshInterval(secs))?;
        Ok(Self::new(interval))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Never evaluated counts as due.
    pub fn is_due(&self, last_evaluated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_evaluated_at {
            None => true,
            Some(last) => now.signed_duration_since(last) >= self.interval,
        }
    }

    /// `None` when the next run falls past the representable calendar.
    pub fn next_due(&self, last_evaluated_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        last_evaluated_at.checked_add_signed(self.interval)
    }
}
