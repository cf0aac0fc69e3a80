//! Explicit run context.
//!
//! Replaces ambient engine/session state: every stage that needs run-wide
//! information receives it through a [`RunContext`] argument.

use chrono::{DateTime, SubsecRound, Utc};

use crate::options::DuplicateIdPolicy;

/// Run-wide values shared by all stages of one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Aggregation time stamped on every summary row of the run.
    pub computed_at: DateTime<Utc>,
    /// How the joiner treats duplicate biography identifiers.
    pub duplicate_ids: DuplicateIdPolicy,
}

impl RunContext {
    /// Context stamped with the current time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Context stamped with a fixed time, truncated to microseconds to match
    /// the precision of the stored timestamp column.
    pub fn at(computed_at: DateTime<Utc>) -> Self {
        Self {
            computed_at: computed_at.trunc_subsecs(6),
            duplicate_ids: DuplicateIdPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    /// Run timestamp as microseconds since the Unix epoch.
    pub fn timestamp_micros(&self) -> i64 {
        self.computed_at.timestamp_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn at_truncates_to_microseconds() {
        let time = Utc
            .timestamp_opt(1_700_000_000, 123_456_789)
            .single()
            .unwrap();
        let ctx = RunContext::at(time);
        assert_eq!(ctx.timestamp_micros(), 1_700_000_000_123_456);
        assert_eq!(ctx.duplicate_ids, DuplicateIdPolicy::FanOut);
    }
}
