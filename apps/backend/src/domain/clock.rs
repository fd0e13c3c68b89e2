//! Clock bookkeeping captured when a game starts.
//!
//! Deadlines are recorded once and never decremented or enforced.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::errors::domain::DomainError;

/// One day. Longer clocks are rejected at creation.
pub const MAX_INITIAL_MINUTES: u32 = 24 * 60;

/// Time control chosen at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    /// Minutes on each clock at game start, `1..=MAX_INITIAL_MINUTES` when
    /// created through the API.
    pub initial_minutes: u32,
    /// Per-move increment in seconds.
    pub increment_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockBook {
    #[serde(with = "time::serde::rfc3339")]
    pub white_deadline: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub black_deadline: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
    pub increment_seconds: u32,
}

impl ClockBook {
    /// Fails if the deadline falls outside the representable date range.
    pub fn start(control: TimeControl, now: OffsetDateTime) -> Result<Self, DomainError> {
        let deadline = now
            .checked_add(Duration::minutes(i64::from(control.initial_minutes)))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "initial_time of {} minutes is out of range",
                    control.initial_minutes
                ))
            })?;
        Ok(Self {
            white_deadline: deadline,
            black_deadline: deadline,
            last_update: now,
            increment_seconds: control.increment_seconds,
        })
    }
}
