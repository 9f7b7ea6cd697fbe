// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar Events
//!
//! Transit, sunrise, sunset and arbitrary solar-elevation crossings for a
//! civil date and a place on Earth, from the low-precision solar ephemeris
//! of *Jean Meeus — Astronomical Algorithms*.
//!
//! # Pipeline
//!
//! ```text
//! NaiveDate ─► JulianDate (d−1, d, d+1) ─► SolarPosition ×3 ─► TransitSolver ─► DayEvents
//! ```
//!
//! # Core types
//!
//! - [`JulianDate`] — continuous day count, with the Gregorian ↔ JD
//!   transforms.
//! - [`SolarPosition`] — apparent declination, right ascension and sidereal
//!   time of a day.
//! - [`Coordinates`] — validated observer latitude/longitude.
//! - [`TransitSolver`] — rise/transit/set solver over a three-day triple.
//! - [`DayEvents`] — the day's transit, sunrise and sunset, plus further
//!   crossings on demand.
//! - [`SolarError`] — the "no crossing today" condition and input
//!   validation failures.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`angle`] | range reduction and three-point interpolation |
//! | [`julian`] | calendar ↔ Julian Day arithmetic |
//! | [`ephemeris`] | solar and lunar mean elements, obliquity, nutation, sidereal time |
//! | [`solar`] | apparent solar position |
//! | [`transit`] | transit and hour-angle solver, standard horizons |
//! | [`day`] | per-date entry point |
//! | [`twilight`] | seasonal and night-fraction twilight safeguards |
//! | [`clock`] | hour values ↔ UTC instants |
//!
//! # Conventions
//!
//! Longitudes are east-positive.  Event times are real UT hours counted from
//! 0h of the requested date and may fall outside `[0, 24)`; use
//! [`hours_to_utc`] (or [`DayEvents::to_utc`]) to obtain a civil instant.
//!
//! No logger is installed; diagnostics go through the [`log`] facade.

pub mod angle;
pub mod clock;
mod coordinates;
pub mod day;
pub mod ephemeris;
mod error;
pub mod julian;
pub mod solar;
pub mod transit;
pub mod twilight;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use angle::{CyclicAngle, Samples};
pub use clock::{hours_to_utc, round_to_minute, TimeComponents};
pub use coordinates::Coordinates;
pub use day::{compute_day_events, hour_angle_crossing, DayEvents};
pub use error::{SolarError, SolarResult};
pub use julian::{CalendarDate, JulianDate};
pub use solar::{compute_solar_position, SolarPosition};
pub use transit::{altitude_of_celestial_body, Horizon, TransitSolver};
pub use twilight::{
    days_since_solstice, season_adjusted_evening_twilight, season_adjusted_morning_twilight,
    twilight_safeguard, HighLatitudeRule, NightPortions, Twilight,
};
