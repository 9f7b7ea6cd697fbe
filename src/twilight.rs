// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Twilight safeguards for high latitudes
//!
//! Near the poles the Sun can stay above a twilight elevation all night, so
//! the angle-based morning/evening crossing either does not exist or drifts
//! implausibly far from sunrise/sunset.  This module provides two
//! independent fallbacks; deciding which candidate to keep is up to the
//! caller.
//!
//! ## Seasonal adjustment
//!
//! [`season_adjusted_morning_twilight`] and
//! [`season_adjusted_evening_twilight`] move sunrise earlier (sunset later)
//! by a latitude-scaled number of minutes that varies piecewise-linearly
//! over the year.  The year is measured from the local winter solstice
//! ([`days_since_solstice`]) and split at days 91, 137, 183, 229 and 275:
//!
//! ```text
//!   a ──(91)── b ──(46)── c ──(46)── d ──(46)── c ──(46)── b ──(91)── a
//! ```
//!
//! | Constant | Morning | Evening |
//! |----------|---------|---------|
//! | a | 75 + 28.65/55·\|φ\| | 75 + 25.60/55·\|φ\| |
//! | b | 75 + 19.44/55·\|φ\| | 75 + 2.050/55·\|φ\| |
//! | c | 75 + 32.74/55·\|φ\| | 75 − 9.210/55·\|φ\| |
//! | d | 75 + 48.10/55·\|φ\| | 75 + 6.140/55·\|φ\| |
//!
//! ## Night portions
//!
//! [`HighLatitudeRule`] bounds the twilight by a fraction of the night
//! (sunset to the next sunrise), see [`NightPortions`].

use crate::julian::is_leap_year;
use chrono::{DateTime, TimeDelta, Utc};
use qtty::Degrees;

/// Northern hemisphere: days from the December solstice to January 1st.
const NORTHERN_OFFSET: i64 = 10;

/// Seasonal breakpoints, in days since the winter solstice.
const BREAKPOINTS: [i64; 5] = [91, 137, 183, 229, 275];

/// Days elapsed since the most recent local winter solstice.
///
/// `day_of_year` is 1-based.  The hemisphere follows the sign of
/// `latitude`; the equator counts as northern.
pub fn days_since_solstice(day_of_year: u32, year: i32, latitude: Degrees) -> u32 {
    let leap = is_leap_year(year);
    let days_in_year: i64 = if leap { 366 } else { 365 };
    let day_of_year = i64::from(day_of_year);

    let days = if latitude.value() >= 0.0 {
        let days = day_of_year + NORTHERN_OFFSET;
        if days >= days_in_year {
            days - days_in_year
        } else {
            days
        }
    } else {
        let southern_offset = if leap { 173 } else { 172 };
        let days = day_of_year - southern_offset;
        if days < 0 {
            days + days_in_year
        } else {
            days
        }
    };
    days as u32
}

/// Piecewise-linear seasonal curve through `a b c d c b a`.
fn seasonal_minutes(a: f64, b: f64, c: f64, d: f64, days: u32) -> f64 {
    let dyy = i64::from(days);
    let [b1, b2, b3, b4, b5] = BREAKPOINTS;
    let (from, to, start, span) = if dyy < b1 {
        (a, b, 0, 91.0)
    } else if dyy < b2 {
        (b, c, b1, 46.0)
    } else if dyy < b3 {
        (c, d, b2, 46.0)
    } else if dyy < b4 {
        (d, c, b3, 46.0)
    } else if dyy < b5 {
        (c, b, b4, 46.0)
    } else {
        (b, a, b5, 91.0)
    };
    from + (to - from) / span * (dyy - start) as f64
}

/// Whole seconds of `minutes`, or `None` beyond chrono's `TimeDelta` range.
fn offset_from_minutes(minutes: f64) -> Option<TimeDelta> {
    let seconds = (minutes * 60.0).round();
    if !seconds.is_finite() {
        return None;
    }
    TimeDelta::try_seconds(seconds as i64)
}

/// Signed offset applied to sunrise by [`season_adjusted_morning_twilight`].
///
/// `None` for latitudes so large the offset overflows a [`TimeDelta`].
pub fn morning_twilight_offset(
    latitude: Degrees,
    day_of_year: u32,
    year: i32,
) -> Option<TimeDelta> {
    let lat = latitude.value().abs();
    let minutes = seasonal_minutes(
        75.0 + 28.65 / 55.0 * lat,
        75.0 + 19.44 / 55.0 * lat,
        75.0 + 32.74 / 55.0 * lat,
        75.0 + 48.10 / 55.0 * lat,
        days_since_solstice(day_of_year, year, latitude),
    );
    offset_from_minutes(-minutes)
}

/// Signed offset applied to sunset by [`season_adjusted_evening_twilight`].
pub fn evening_twilight_offset(
    latitude: Degrees,
    day_of_year: u32,
    year: i32,
) -> Option<TimeDelta> {
    let lat = latitude.value().abs();
    let minutes = seasonal_minutes(
        75.0 + 25.60 / 55.0 * lat,
        75.0 + 2.050 / 55.0 * lat,
        75.0 - 9.210 / 55.0 * lat,
        75.0 + 6.140 / 55.0 * lat,
        days_since_solstice(day_of_year, year, latitude),
    );
    offset_from_minutes(minutes)
}

/// Sunrise moved earlier by the seasonal morning-twilight length.
///
/// `None` if the offset or the result leaves chrono's range.
pub fn season_adjusted_morning_twilight(
    latitude: Degrees,
    day_of_year: u32,
    year: i32,
    sunrise: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    sunrise.checked_add_signed(morning_twilight_offset(latitude, day_of_year, year)?)
}

/// Sunset moved later by the seasonal evening-twilight length.
pub fn season_adjusted_evening_twilight(
    latitude: Degrees,
    day_of_year: u32,
    year: i32,
    sunset: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    sunset.checked_add_signed(evening_twilight_offset(latitude, day_of_year, year)?)
}

/// Which end of the night a safeguard applies to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Twilight {
    /// Before sunrise.
    Morning,
    /// After sunset.
    Evening,
}

/// Seasonal candidate for the given twilight: `raw_instant` is sunrise for
/// [`Twilight::Morning`] and sunset for [`Twilight::Evening`].
pub fn twilight_safeguard(
    latitude: Degrees,
    day_of_year: u32,
    year: i32,
    raw_instant: DateTime<Utc>,
    twilight: Twilight,
) -> Option<DateTime<Utc>> {
    match twilight {
        Twilight::Morning => {
            season_adjusted_morning_twilight(latitude, day_of_year, year, raw_instant)
        }
        Twilight::Evening => {
            season_adjusted_evening_twilight(latitude, day_of_year, year, raw_instant)
        }
    }
}

// ---------------------------------------------------------------------------
// Night portions
// ---------------------------------------------------------------------------

/// How much of the night a twilight may occupy at most.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum HighLatitudeRule {
    /// Half of the night.
    #[default]
    MiddleOfNight,
    /// One seventh of the night.
    SeventhOfNight,
    /// `angle / 60` of the night, `angle` being the twilight depression.
    TwilightAngle,
}

impl HighLatitudeRule {
    /// Night fractions for a morning and an evening twilight defined by the
    /// given elevations.  Only [`TwilightAngle`](Self::TwilightAngle) reads
    /// them; the sign is ignored.
    pub fn night_portions(&self, morning: Degrees, evening: Degrees) -> NightPortions {
        match self {
            HighLatitudeRule::MiddleOfNight => NightPortions::new(0.5, 0.5),
            HighLatitudeRule::SeventhOfNight => NightPortions::new(1.0 / 7.0, 1.0 / 7.0),
            HighLatitudeRule::TwilightAngle => NightPortions::new(
                morning.value().abs() / 60.0,
                evening.value().abs() / 60.0,
            ),
        }
    }
}

/// Fractions of the night allotted to the morning and evening twilights.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NightPortions {
    pub morning: f64,
    pub evening: f64,
}

impl NightPortions {
    #[inline]
    pub const fn new(morning: f64, evening: f64) -> Self {
        Self { morning, evening }
    }

    /// `sunrise` minus the morning share of `night`, whole seconds.
    pub fn safe_morning(&self, sunrise: DateTime<Utc>, night: TimeDelta) -> Option<DateTime<Utc>> {
        sunrise.checked_sub_signed(Self::fraction(night, self.morning)?)
    }

    /// `sunset` plus the evening share of `night`, whole seconds.
    pub fn safe_evening(&self, sunset: DateTime<Utc>, night: TimeDelta) -> Option<DateTime<Utc>> {
        sunset.checked_add_signed(Self::fraction(night, self.evening)?)
    }

    fn fraction(night: TimeDelta, portion: f64) -> Option<TimeDelta> {
        let seconds = portion * night.num_seconds() as f64;
        if !seconds.is_finite() {
            return None;
        }
        TimeDelta::try_seconds(seconds.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
            .and_utc()
    }

    fn deg(v: f64) -> Degrees {
        Degrees::new(v)
    }

    #[test]
    fn northern_solstice_offset_wraps_at_year_end() {
        assert_eq!(days_since_solstice(1, 2024, deg(55.0)), 11);
        assert_eq!(days_since_solstice(193, 2015, deg(35.78)), 203);
        assert_eq!(days_since_solstice(356, 2023, deg(10.0)), 1);
        assert_eq!(days_since_solstice(355, 2023, deg(10.0)), 0);
        // Leap year keeps day 365 instead of wrapping.
        assert_eq!(days_since_solstice(355, 2024, deg(10.0)), 365);
        assert_eq!(days_since_solstice(356, 2024, deg(10.0)), 0);
        // Equator counts as north.
        assert_eq!(days_since_solstice(100, 2023, deg(0.0)), 110);
    }

    #[test]
    fn southern_solstice_offset_depends_on_leap_year() {
        assert_eq!(days_since_solstice(173, 2024, deg(-5.0)), 0);
        assert_eq!(days_since_solstice(172, 2023, deg(-5.0)), 0);
        assert_eq!(days_since_solstice(10, 2024, deg(-5.0)), 203);
        assert_eq!(days_since_solstice(1, 2023, deg(-33.9)), 194);
        assert_eq!(days_since_solstice(200, 2024, deg(-33.9)), 27);
    }

    #[test]
    fn seasonal_offsets_reference_values() {
        let cases = [
            (35.78, 193, 2015, -6117, 4479),
            (55.0, 1, 2024, -6152, 5865),
            (55.0, 355, 2024, -6213, 6020),
            (-33.9, 1, 2023, -6143, 4591),
            (-33.9, 200, 2024, -5458, 5188),
            (48.85, 172, 2024, -7045, 4809),
        ];
        for (lat, doy, year, morning, evening) in cases {
            assert_eq!(
                morning_twilight_offset(deg(lat), doy, year).unwrap().num_seconds(),
                morning,
                "morning {lat} {doy} {year}"
            );
            assert_eq!(
                evening_twilight_offset(deg(lat), doy, year).unwrap().num_seconds(),
                evening,
                "evening {lat} {doy} {year}"
            );
        }
    }

    #[test]
    fn equator_is_a_flat_75_minutes() {
        for doy in [1, 91, 137, 183, 229, 275, 365] {
            let morning = morning_twilight_offset(deg(0.0), doy, 2023).unwrap();
            let evening = evening_twilight_offset(deg(0.0), doy, 2023).unwrap();
            assert_eq!(morning.num_seconds(), -4500);
            assert_eq!(evening.num_seconds(), 4500);
        }
    }

    #[test]
    fn unrepresentable_latitudes_yield_none() {
        let sunrise = utc(2024, 6, 21, 3, 0, 0);
        for lat in [1e300, -1e300, f64::NAN, f64::INFINITY] {
            assert_eq!(morning_twilight_offset(deg(lat), 100, 2024), None, "{lat}");
            assert_eq!(evening_twilight_offset(deg(lat), 100, 2024), None, "{lat}");
            assert_eq!(
                season_adjusted_morning_twilight(deg(lat), 100, 2024, sunrise),
                None
            );
            assert_eq!(
                twilight_safeguard(deg(lat), 100, 2024, sunrise, Twilight::Evening),
                None
            );
        }
    }

    #[test]
    fn curve_is_continuous_at_breakpoints() {
        let (a, b, c, d) = (10.0, 20.0, 30.0, 40.0);
        assert_eq!(seasonal_minutes(a, b, c, d, 0), a);
        assert_eq!(seasonal_minutes(a, b, c, d, 91), b);
        assert_eq!(seasonal_minutes(a, b, c, d, 137), c);
        assert_eq!(seasonal_minutes(a, b, c, d, 183), d);
        assert_eq!(seasonal_minutes(a, b, c, d, 229), c);
        assert_eq!(seasonal_minutes(a, b, c, d, 275), b);
        assert!((seasonal_minutes(a, b, c, d, 90) - (a + 10.0 / 91.0 * 90.0)).abs() < 1e-12);
        assert!((seasonal_minutes(a, b, c, d, 365) - (b + (a - b) / 91.0 * 90.0)).abs() < 1e-12);
    }

    #[test]
    fn safeguard_moves_sunrise_and_sunset_outwards() {
        let sunrise = utc(2015, 7, 12, 10, 8, 0);
        let sunset = utc(2015, 7, 13, 0, 32, 0);
        let lat = deg(35.78);

        let morning = twilight_safeguard(lat, 193, 2015, sunrise, Twilight::Morning).unwrap();
        assert_eq!(morning, sunrise - TimeDelta::seconds(6117));
        assert_eq!(
            morning,
            season_adjusted_morning_twilight(lat, 193, 2015, sunrise).unwrap()
        );

        let evening = twilight_safeguard(lat, 193, 2015, sunset, Twilight::Evening).unwrap();
        assert_eq!(evening, sunset + TimeDelta::seconds(4479));
    }

    #[test]
    fn night_portions_per_rule() {
        let fajr = deg(-18.0);
        let isha = deg(-17.0);
        assert_eq!(
            HighLatitudeRule::MiddleOfNight.night_portions(fajr, isha),
            NightPortions::new(0.5, 0.5)
        );
        assert_eq!(
            HighLatitudeRule::SeventhOfNight.night_portions(fajr, isha),
            NightPortions::new(1.0 / 7.0, 1.0 / 7.0)
        );
        let angle = HighLatitudeRule::TwilightAngle.night_portions(fajr, isha);
        assert!((angle.morning - 0.3).abs() < 1e-12);
        assert!((angle.evening - 17.0 / 60.0).abs() < 1e-12);
        assert_eq!(HighLatitudeRule::default(), HighLatitudeRule::MiddleOfNight);
    }

    #[test]
    fn night_portion_candidates() {
        let sunset = utc(2024, 6, 21, 21, 0, 0);
        let sunrise = utc(2024, 6, 21, 3, 0, 0);
        let night = TimeDelta::hours(6);

        let portions = HighLatitudeRule::SeventhOfNight.night_portions(deg(-18.0), deg(-18.0));
        // 6h / 7 = 3085.714… s, truncated.
        assert_eq!(
            portions.safe_morning(sunrise, night),
            Some(sunrise - TimeDelta::seconds(3085))
        );
        assert_eq!(
            portions.safe_evening(sunset, night),
            Some(sunset + TimeDelta::seconds(3085))
        );

        let half = NightPortions::new(0.5, 0.5);
        assert_eq!(
            half.safe_evening(sunset, night),
            Some(utc(2024, 6, 22, 0, 0, 0))
        );
    }
}
