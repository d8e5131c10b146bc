//! Timestamps and the windows reading logs are queried over.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use chrono::TimeDelta;

use crate::error::ValidationError;

/// UTC timestamp used for sensor readings.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Closed interval `[start, end]` of past time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TimeWindow {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] when `start` is after `end`
    /// or `end` lies in the future.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start > end || end > now() {
            return Err(ValidationError::InvalidWindow);
        }
        Ok(Self { start, end })
    }

    /// The `span` leading up to now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] for a negative or
    /// unrepresentable span.
    pub fn last(span: TimeDelta) -> Result<Self, ValidationError> {
        let end = now();
        let start = end
            .checked_sub_signed(span)
            .ok_or(ValidationError::InvalidWindow)?;
        Self::new(start, end)
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Whether `a` and `b` lie strictly less than `delta` apart.
#[must_use]
pub fn same_instant(a: Timestamp, b: Timestamp, delta: TimeDelta) -> bool {
    a - b < delta && b - a < delta
}
