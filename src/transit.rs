// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Transit and hour-angle solver
//!
//! Turns a three-day ephemeris triple into clock times for one observer,
//! following *Meeus — Astronomical Algorithms*, chapter 15 ("Rising,
//! Transit and Setting").
//!
//! | Step | Method | Output |
//! |------|--------|--------|
//! | first guess | [`TransitSolver::approximate_transit`] | fraction of the day, `[0, 1)` |
//! | meridian crossing | [`TransitSolver::corrected_transit`] | UT hours |
//! | elevation crossing | [`TransitSolver::corrected_hour_angle`] | UT hours or [`SolarError::NoEvent`] |
//! | shadow-ratio crossing | [`TransitSolver::afternoon`] | UT hours or [`SolarError::NoEvent`] |
//!
//! Hours are counted from 0h UT of the *current* sample day and are not
//! wrapped: west of Greenwich a sunset can land past 24h, east of it a
//! sunrise can be negative.  [`hours_to_utc`](crate::clock::hours_to_utc)
//! carries such values into the neighbouring calendar day.
//!
//! Both corrections take a single Newton step from the first guess.  The
//! returned times are accurate to about a minute, which is what published
//! sunrise tables resolve.

use crate::angle::{
    closest_angle, normalize, to_degrees, to_radians, unwind_angle, CyclicAngle, Samples,
};
use crate::coordinates::Coordinates;
use crate::error::{SolarError, SolarResult};
use crate::julian::JulianDate;
use crate::solar::{compute_solar_position, SolarPosition};
use log::{debug, trace};
use qtty::{Days, Degrees, Hours};

/// Sidereal degrees swept per solar day.
const SIDEREAL_RATE: f64 = 360.985_647;

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// Standard solar elevations used as event thresholds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Horizon {
    /// Upper limb on the horizon with standard refraction: −50′.
    SunriseSunset,
    /// Centre 6° below the horizon.
    CivilTwilight,
    /// Centre 12° below the horizon.
    NauticalTwilight,
    /// Centre 18° below the horizon.
    AstronomicalTwilight,
    /// Any other elevation of the Sun's centre.
    Custom(Degrees),
}

impl Horizon {
    /// The elevation of the Sun's centre that defines this horizon.
    pub fn elevation(&self) -> Degrees {
        match self {
            Horizon::SunriseSunset => Degrees::new(-50.0 / 60.0),
            Horizon::CivilTwilight => Degrees::new(-6.0),
            Horizon::NauticalTwilight => Degrees::new(-12.0),
            Horizon::AstronomicalTwilight => Degrees::new(-18.0),
            Horizon::Custom(elevation) => *elevation,
        }
    }
}

impl From<Degrees> for Horizon {
    #[inline]
    fn from(elevation: Degrees) -> Self {
        Horizon::Custom(elevation)
    }
}

/// Altitude above the horizon of a body at `declination` seen from
/// `latitude` with local hour angle `local_hour_angle` (Meeus 13.6).
pub fn altitude_of_celestial_body(
    latitude: Degrees,
    declination: Degrees,
    local_hour_angle: Degrees,
) -> Degrees {
    let phi = to_radians(latitude.value());
    let delta = to_radians(declination.value());
    let h = to_radians(local_hour_angle.value());
    let sin_alt = phi.sin() * delta.sin() + phi.cos() * delta.cos() * h.cos();
    Degrees::new(to_degrees(sin_alt.asin()))
}

// ---------------------------------------------------------------------------
// TransitSolver
// ---------------------------------------------------------------------------

/// Rise/transit/set solver for one observer over one ephemeris triple.
///
/// Only the current day's sidereal time is used; right ascension and
/// declination are interpolated across all three samples.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitSolver {
    coordinates: Coordinates,
    sidereal_time: Degrees,
    right_ascension: Samples<CyclicAngle>,
    declination: Samples<Degrees>,
}

impl TransitSolver {
    /// Solver over a solar ephemeris triple.
    pub fn new(coordinates: Coordinates, positions: Samples<SolarPosition>) -> Self {
        Self {
            coordinates,
            sidereal_time: positions.current.apparent_sidereal_time,
            right_ascension: positions.map(|p| p.right_ascension),
            declination: positions.map(|p| p.declination),
        }
    }

    /// Solver for the day starting at `julian_day` (0h UT), building the
    /// triple from the days before and after.
    pub fn at(coordinates: Coordinates, julian_day: JulianDate) -> Self {
        let one_day = Days::new(1.0);
        let days = Samples::new(julian_day - one_day, julian_day, julian_day + one_day);
        Self::new(coordinates, days.map(|jd| compute_solar_position(*jd)))
    }

    /// Solver over arbitrary equatorial samples, for bodies other than the
    /// Sun.
    pub fn from_parts(
        coordinates: Coordinates,
        sidereal_time: Degrees,
        right_ascension: Samples<CyclicAngle>,
        declination: Samples<Degrees>,
    ) -> Self {
        Self {
            coordinates,
            sidereal_time,
            right_ascension,
            declination,
        }
    }

    #[inline]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// West-positive longitude, the sign convention of Meeus' formulas.
    #[inline]
    fn west_longitude(&self) -> f64 {
        -self.coordinates.longitude().value()
    }

    /// Sidereal time advanced by `m` days from 0h UT, unwound.
    #[inline]
    fn sidereal_time_at(&self, m: f64) -> f64 {
        unwind_angle(self.sidereal_time.value() + SIDEREAL_RATE * m)
    }

    /// First estimate of the transit as a fraction of the day, in `[0, 1)`.
    pub fn approximate_transit(&self) -> f64 {
        let ra = self.right_ascension.current.value();
        normalize(
            (ra + self.west_longitude() - self.sidereal_time.value()) / 360.0,
            1.0,
        )
    }

    /// Meridian crossing in UT hours, refined once from `approximate_transit`.
    pub fn corrected_transit(&self, approximate_transit: f64) -> Hours {
        let m0 = approximate_transit;
        let theta = self.sidereal_time_at(m0);
        let alpha = self.right_ascension.interpolate(m0).value();
        let hour_angle = closest_angle(theta - self.west_longitude() - alpha);
        let dm = hour_angle / -360.0;
        Hours::new((m0 + dm) * 24.0)
    }

    /// UT hours at which the body's centre crosses `elevation`, before the
    /// transit or after it.
    ///
    /// Fails with [`SolarError::NoEvent`] when the body stays above or below
    /// `elevation` for the whole day, or only grazes it so closely that the
    /// correction step would cross the transit.
    pub fn corrected_hour_angle(
        &self,
        approximate_transit: f64,
        elevation: Degrees,
        after_transit: bool,
    ) -> SolarResult<Hours> {
        let m0 = approximate_transit;
        let latitude = self.coordinates.latitude();
        let h0 = elevation.value();
        let phi = to_radians(latitude.value());
        let delta = to_radians(self.declination.current.value());

        trace!(
            "hour angle: m0={m0}, h0={h0}, φ={}, δ={}, after_transit={after_transit}",
            latitude.value(),
            self.declination.current.value()
        );

        let no_event = || {
            let err = SolarError::NoEvent {
                elevation: h0,
                latitude: latitude.value(),
                declination: self.declination.current.value(),
            };
            debug!("{err}");
            err
        };

        let cos_h0 = (to_radians(h0).sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());
        if !cos_h0.is_finite() || !(-1.0..=1.0).contains(&cos_h0) {
            return Err(no_event());
        }

        let big_h0 = to_degrees(cos_h0.acos());
        let m = if after_transit {
            m0 + big_h0 / 360.0
        } else {
            m0 - big_h0 / 360.0
        };

        let theta = self.sidereal_time_at(m);
        let alpha = self.right_ascension.interpolate(m).value();
        let declination = self.declination.interpolate(m);
        let hour_angle = theta - self.west_longitude() - alpha;

        let altitude =
            altitude_of_celestial_body(latitude, declination, Degrees::new(hour_angle));
        let dm = (altitude.value() - h0)
            / (360.0
                * to_radians(declination.value()).cos()
                * phi.cos()
                * to_radians(hour_angle).sin());

        // Near the grazing latitude sin(H) vanishes and the step overshoots
        // across the transit; that is no crossing, not an early one.
        let corrected = m + dm;
        let wrong_side = if after_transit {
            corrected <= m0
        } else {
            corrected >= m0
        };
        if !corrected.is_finite() || dm.abs() >= 0.5 || wrong_side {
            return Err(no_event());
        }
        Ok(Hours::new(corrected * 24.0))
    }

    /// Elevation at which a vertical gnomon casts a shadow of
    /// `shadow_length_factor` times its height plus its noon shadow.
    pub fn afternoon_elevation(&self, shadow_length_factor: f64) -> Degrees {
        let zenith_gap =
            (self.coordinates.latitude().value() - self.declination.current.value()).abs();
        let tangent = shadow_length_factor + to_radians(zenith_gap).tan();
        Degrees::new(to_degrees((1.0 / tangent).atan()))
    }

    /// UT hours after transit at which the shadow reaches
    /// [`afternoon_elevation`](Self::afternoon_elevation).
    pub fn afternoon(
        &self,
        approximate_transit: f64,
        shadow_length_factor: f64,
    ) -> SolarResult<Hours> {
        let elevation = self.afternoon_elevation(shadow_length_factor);
        self.corrected_hour_angle(approximate_transit, elevation, true)
    }
}
