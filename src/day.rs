// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar events of one civil day at one place.
//!
//! [`compute_day_events`] is the entry point: it evaluates the ephemeris on
//! the day before, the day itself and the day after, hands the triple to a
//! [`TransitSolver`] and keeps the transit, sunrise and sunset.  Further
//! elevation crossings (twilights, shadow-ratio afternoons) are answered
//! from the same context without recomputing the ephemeris.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use heliotime::{compute_day_events, Coordinates, Horizon};
//!
//! let san_francisco = Coordinates::new(37.7749, -122.4194).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let day = compute_day_events(date, &san_francisco).unwrap();
//!
//! let sunrise = day.sunrise().unwrap();
//! let sunset = day.sunset().unwrap();
//! assert!(sunrise < day.transit() && day.transit() < sunset);
//!
//! let dawn = day.crossing(Horizon::AstronomicalTwilight, false).unwrap();
//! assert!(dawn < sunrise);
//! ```

use crate::angle::Samples;
use crate::clock::hours_to_utc;
use crate::coordinates::Coordinates;
use crate::error::{SolarError, SolarResult};
use crate::julian::JulianDate;
use crate::solar::{compute_solar_position, SolarPosition};
use crate::transit::{Horizon, TransitSolver};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use log::trace;
use qtty::{Degrees, Hours};

/// Transit, sunrise and sunset of a date, plus the context needed to solve
/// for any other elevation crossing on that date.
///
/// All hour values are UT hours from 0h of [`date`](Self::date).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DayEvents {
    date: NaiveDate,
    positions: Samples<SolarPosition>,
    solver: TransitSolver,
    approximate_transit: f64,
    transit: Hours,
    sunrise: SolarResult<Hours>,
    sunset: SolarResult<Hours>,
}

impl DayEvents {
    /// Events for `date` with the standard −50′ sunrise/sunset horizon.
    pub fn new(date: NaiveDate, coordinates: Coordinates) -> SolarResult<Self> {
        Self::with_horizon(date, coordinates, Horizon::SunriseSunset)
    }

    /// Events for `date`, with sunrise and sunset taken at `horizon`.
    ///
    /// Fails with [`SolarError::DateOutOfRange`] on the first or last day
    /// chrono can represent.
    pub fn with_horizon(
        date: NaiveDate,
        coordinates: Coordinates,
        horizon: Horizon,
    ) -> SolarResult<Self> {
        let out_of_range = SolarError::DateOutOfRange { date };
        let previous = date.pred_opt().ok_or(out_of_range)?;
        let next = date.succ_opt().ok_or(out_of_range)?;

        let positions = Samples::new(previous, date, next)
            .map(|day| compute_solar_position(JulianDate::from_date(*day)));
        let solver = TransitSolver::new(coordinates, positions);

        let approximate_transit = solver.approximate_transit();
        trace!(
            "{date} at {coordinates}: m0={approximate_transit}, α=({}, {}, {})",
            positions.previous.right_ascension,
            positions.current.right_ascension,
            positions.next.right_ascension
        );

        let transit = solver.corrected_transit(approximate_transit);
        let elevation = horizon.elevation();
        let sunrise = solver.corrected_hour_angle(approximate_transit, elevation, false);
        let sunset = solver.corrected_hour_angle(approximate_transit, elevation, true);

        Ok(Self {
            date,
            positions,
            solver,
            approximate_transit,
            transit,
            sunrise,
            sunset,
        })
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub const fn coordinates(&self) -> Coordinates {
        self.solver.coordinates()
    }

    /// Solar positions at 0h UT of the day before, the day, and the day
    /// after.
    #[inline]
    pub const fn positions(&self) -> Samples<SolarPosition> {
        self.positions
    }

    /// First transit estimate as a fraction of the day, `[0, 1)`.
    #[inline]
    pub const fn approximate_transit(&self) -> f64 {
        self.approximate_transit
    }

    /// Solar noon.
    #[inline]
    pub const fn transit(&self) -> Hours {
        self.transit
    }

    #[inline]
    pub fn sunrise(&self) -> SolarResult<Hours> {
        self.sunrise
    }

    #[inline]
    pub fn sunset(&self) -> SolarResult<Hours> {
        self.sunset
    }

    // ── further crossings ─────────────────────────────────────────────

    /// When the Sun's centre crosses `elevation`, before or after transit.
    pub fn hour_angle_crossing(
        &self,
        elevation: Degrees,
        after_transit: bool,
    ) -> SolarResult<Hours> {
        self.solver
            .corrected_hour_angle(self.approximate_transit, elevation, after_transit)
    }

    /// [`hour_angle_crossing`](Self::hour_angle_crossing) at a named horizon.
    #[inline]
    pub fn crossing(&self, horizon: Horizon, after_transit: bool) -> SolarResult<Hours> {
        self.hour_angle_crossing(horizon.elevation(), after_transit)
    }

    /// When a gnomon's shadow grows to `shadow_length_factor` times its
    /// height beyond its noon length.
    pub fn afternoon(&self, shadow_length_factor: f64) -> SolarResult<Hours> {
        self.solver
            .afternoon(self.approximate_transit, shadow_length_factor)
    }

    /// Sunset to the following sunrise, the latter taken as today's sunrise
    /// one day later.
    ///
    /// `None` without a sunrise or sunset, or when the span does not fit a
    /// [`TimeDelta`].
    pub fn night(&self) -> Option<TimeDelta> {
        let sunrise = self.sunrise.ok()?;
        let sunset = self.sunset.ok()?;
        let seconds = ((sunrise.value() + 24.0 - sunset.value()) * 3600.0).trunc();
        if !seconds.is_finite() {
            return None;
        }
        TimeDelta::try_seconds(seconds as i64)
    }

    /// Anchor an hour value of this day to a UTC instant.
    #[inline]
    pub fn to_utc(&self, hours: Hours) -> Option<DateTime<Utc>> {
        hours_to_utc(self.date, hours)
    }
}

/// Transit, sunrise and sunset of `date` at `coordinates`.
#[inline]
pub fn compute_day_events(date: NaiveDate, coordinates: &Coordinates) -> SolarResult<DayEvents> {
    DayEvents::new(date, *coordinates)
}

/// UT hour at which the Sun's centre crosses `elevation` on the day of
/// `events`, or [`SolarError::NoEvent`] if it never does.
#[inline]
pub fn hour_angle_crossing(
    events: &DayEvents,
    elevation: Degrees,
    after_transit: bool,
) -> SolarResult<Hours> {
    events.hour_angle_crossing(elevation, after_transit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn san_francisco() -> Coordinates {
        Coordinates::new(37.7749, -122.4194).unwrap()
    }

    #[test]
    fn san_francisco_summer_solstice() {
        let day = compute_day_events(date(2024, 6, 21), &san_francisco()).unwrap();
        assert_abs_diff_eq!(day.approximate_transit(), 0.841_32, epsilon = 1e-5);
        assert_abs_diff_eq!(day.transit().value(), 20.194_64, epsilon = 1e-4);
        assert_abs_diff_eq!(day.sunrise().unwrap().value(), 12.803_16, epsilon = 1e-4);
        assert_abs_diff_eq!(day.sunset().unwrap().value(), 27.585_86, epsilon = 1e-4);
    }

    #[test]
    fn events_are_ordered_through_the_year() {
        for (y, m, d) in [(2024, 3, 20), (2024, 6, 21), (2024, 9, 22), (2024, 12, 21)] {
            let day = compute_day_events(date(y, m, d), &san_francisco()).unwrap();
            let sunrise = day.sunrise().unwrap();
            let sunset = day.sunset().unwrap();
            assert!(sunrise < day.transit(), "{y}-{m}-{d}");
            assert!(day.transit() < sunset, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn twilight_crossings_bracket_the_day() {
        let day = compute_day_events(date(2024, 6, 21), &san_francisco()).unwrap();
        let dawn = day.crossing(Horizon::AstronomicalTwilight, false).unwrap();
        let dusk = day.hour_angle_crossing(Degrees::new(-17.0), true).unwrap();
        assert_abs_diff_eq!(dawn.value(), 10.883_52, epsilon = 1e-4);
        assert_abs_diff_eq!(dusk.value(), 29.372_73, epsilon = 1e-4);

        let civil = day.crossing(Horizon::CivilTwilight, false).unwrap();
        let nautical = day.crossing(Horizon::NauticalTwilight, false).unwrap();
        assert!(dawn < nautical && nautical < civil);
        assert!(civil < day.sunrise().unwrap());
    }

    #[test]
    fn free_function_matches_method() {
        let day = compute_day_events(date(2024, 3, 20), &san_francisco()).unwrap();
        let elevation = Degrees::new(-12.0);
        assert_eq!(
            hour_angle_crossing(&day, elevation, true),
            day.hour_angle_crossing(elevation, true)
        );
    }

    #[test]
    fn custom_horizon_moves_sunrise() {
        let coords = san_francisco();
        let standard = DayEvents::new(date(2024, 6, 21), coords).unwrap();
        let civil =
            DayEvents::with_horizon(date(2024, 6, 21), coords, Horizon::CivilTwilight).unwrap();
        assert_eq!(standard.transit(), civil.transit());
        assert!(civil.sunrise().unwrap() < standard.sunrise().unwrap());
        assert!(civil.sunset().unwrap() > standard.sunset().unwrap());
    }

    #[test]
    fn polar_day_and_night_have_no_sunrise() {
        let pole = Coordinates::new(89.5, 0.0).unwrap();
        for d in [date(2024, 6, 21), date(2024, 12, 21)] {
            let day = compute_day_events(d, &pole).unwrap();
            assert!(day.transit().value().is_finite());
            assert!(day.sunrise().unwrap_err().is_no_event());
            assert!(day.sunset().unwrap_err().is_no_event());
            assert!(day.night().is_none());
        }
    }

    #[test]
    fn white_nights_keep_sunrise_but_lose_deep_twilight() {
        let oslo_ish = Coordinates::new(60.0, 10.0).unwrap();
        let day = compute_day_events(date(2024, 6, 21), &oslo_ish).unwrap();
        assert_abs_diff_eq!(day.sunrise().unwrap().value(), 1.930_58, epsilon = 1e-4);
        assert_abs_diff_eq!(day.sunset().unwrap().value(), 20.799_39, epsilon = 1e-4);
        assert!(day.crossing(Horizon::AstronomicalTwilight, false).is_err());
        assert!(day.crossing(Horizon::NauticalTwilight, false).is_err());
        assert!(day.crossing(Horizon::CivilTwilight, false).is_ok());
    }

    #[test]
    fn grazing_sunset_leaves_no_night() {
        let place = Coordinates::new(85.1, 0.0).unwrap();
        let day = compute_day_events(date(2024, 9, 12), &place).unwrap();
        assert!(day.sunset().unwrap_err().is_no_event());
        assert!(day.crossing(Horizon::SunriseSunset, true).is_err());
        if let Ok(sunrise) = day.sunrise() {
            assert!(sunrise < day.transit());
        }
        assert_eq!(day.night(), None);
    }

    #[test]
    fn night_length_and_utc_anchor() {
        let day = compute_day_events(date(2024, 6, 21), &san_francisco()).unwrap();
        // 12.80316 + 24 − 27.58586 = 9.2173 h
        let night = day.night().unwrap();
        assert!((night.num_seconds() - 33_182).abs() <= 2, "{night}");

        let sunset = day.to_utc(day.sunset().unwrap()).unwrap();
        assert_eq!(sunset.date_naive(), date(2024, 6, 22));
    }

    #[test]
    fn calendar_edges_are_rejected() {
        let coords = san_francisco();
        assert_eq!(
            DayEvents::new(NaiveDate::MIN, coords),
            Err(SolarError::DateOutOfRange {
                date: NaiveDate::MIN
            })
        );
        assert!(DayEvents::new(NaiveDate::MAX, coords).is_err());
    }
}
