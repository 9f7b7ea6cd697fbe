// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for solar event calculations.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`NoEvent`](SolarError::NoEvent) | hour-angle solver, when the sun never reaches the target elevation |
//! | [`InvalidDate`](SolarError::InvalidDate) | checked calendar constructors |
//! | [`InvalidCoordinates`](SolarError::InvalidCoordinates) | [`Coordinates::new`](crate::Coordinates::new) |
//! | [`DateOutOfRange`](SolarError::DateOutOfRange) | day-event construction at the edge of chrono's calendar |
//!
//! The raw astronomical formulas never fail: they are total over finite
//! inputs. Only the boundaries listed above produce errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure modes of the solar engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SolarError {
    /// The sun does not cross `elevation` on this date at this latitude
    /// (polar day or polar night for that elevation).
    #[error(
        "the sun does not reach {elevation}° at latitude {latitude}° (declination {declination}°)"
    )]
    NoEvent {
        elevation: f64,
        latitude: f64,
        declination: f64,
    },

    /// Not a valid Gregorian calendar date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Latitude outside `[-90, 90]`, longitude outside `[-180, 180]`, or a
    /// non-finite component.
    #[error("invalid coordinates: latitude {latitude}°, longitude {longitude}°")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// The day before or after `date` is not representable.
    #[error("neighbouring days of {date} are outside the supported calendar range")]
    DateOutOfRange { date: NaiveDate },
}

/// Shorthand for `Result<T, SolarError>`.
pub type SolarResult<T> = Result<T, SolarError>;

impl SolarError {
    /// `true` for the "no crossing today" condition.
    #[inline]
    pub fn is_no_event(&self) -> bool {
        matches!(self, SolarError::NoEvent { .. })
    }
}
