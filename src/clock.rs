// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hour-of-day values ↔ civil UTC instants.
//!
//! The solver reports events as real hours counted from 0h UT of the
//! requested date.  These helpers anchor such a value to a calendar date,
//! carrying anything outside `[0, 24)` into the neighbouring day, and round
//! the result to the minute the way published timetables do.

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use qtty::Hours;

/// A real hour value split into whole hours, minutes and seconds.
///
/// Each component is floored, so `hours` may be negative or exceed 23 when
/// the source value lies outside `[0, 24)`; `minutes` and `seconds` are
/// always in `[0, 60)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeComponents {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeComponents {
    /// Split `hours`; `None` for NaN or infinity.
    pub fn from_hours(hours: Hours) -> Option<Self> {
        let value = hours.value();
        if !value.is_finite() {
            return None;
        }
        let h = value.floor();
        let m = ((value - h) * 60.0).floor();
        let s = ((value - (h + m / 60.0)) * 3600.0).floor();
        Some(Self {
            hours: h as i64,
            minutes: m as i64,
            seconds: s as i64,
        })
    }

    /// Signed offset from midnight; `None` if it overflows a [`TimeDelta`].
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        let total = self
            .hours
            .checked_mul(3600)?
            .checked_add(self.minutes * 60 + self.seconds)?;
        TimeDelta::try_seconds(total)
    }
}

impl std::fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// The UTC instant `hours` after 0h of `date`, truncated to the second.
///
/// Returns `None` for non-finite hours or when the instant falls outside
/// chrono's range.
pub fn hours_to_utc(date: NaiveDate, hours: Hours) -> Option<DateTime<Utc>> {
    let components = TimeComponents::from_hours(hours)?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    midnight.checked_add_signed(components.to_time_delta()?)
}

/// Round to the nearest whole minute; 30 seconds and above round up.
///
/// Sub-second precision is discarded before rounding.
pub fn round_to_minute(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let seconds = i64::from(instant.second());
    let offset = if seconds >= 30 { 60 - seconds } else { -seconds };
    let whole = instant.with_nanosecond(0)?;
    whole.checked_add_signed(TimeDelta::seconds(offset))
}
