// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent equatorial position of the Sun and Greenwich apparent sidereal
//! time for a given Julian Day.
//!
//! [`compute_solar_position`] chains the terms of [`ephemeris`](crate::ephemeris)
//! in the order of Meeus ch. 25 (low accuracy, about 0.01°).  The result does
//! not depend on the observer, so one [`SolarPosition`] per day is enough for
//! every location.

use crate::angle::{to_degrees, to_radians, CyclicAngle};
use crate::ephemeris::{
    apparent_obliquity_of_the_ecliptic, apparent_solar_longitude, ascending_lunar_node_longitude,
    mean_lunar_longitude, mean_obliquity_of_the_ecliptic, mean_sidereal_time,
    mean_solar_longitude, nutation_in_longitude, nutation_in_obliquity,
};
use crate::julian::JulianDate;
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Where the Sun is on a given day, as seen from the centre of the Earth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarPosition {
    /// Apparent declination, positive north.
    pub declination: Degrees,
    /// Apparent right ascension.
    pub right_ascension: CyclicAngle,
    /// Greenwich apparent sidereal time at the given instant.
    ///
    /// Mean sidereal time plus the equation of the equinoxes; not re-wound,
    /// so it may exceed 360° by a few arcseconds.
    pub apparent_sidereal_time: Degrees,
}

impl SolarPosition {
    /// Equivalent to [`compute_solar_position`].
    #[inline]
    pub fn at(julian_day: JulianDate) -> Self {
        compute_solar_position(julian_day)
    }
}

/// Solar declination, right ascension and apparent sidereal time for
/// `julian_day`.
///
/// Defined for every finite Julian Day; accuracy degrades slowly away from
/// J2000.0.
pub fn compute_solar_position(julian_day: JulianDate) -> SolarPosition {
    let t = julian_day.julian_centuries();

    let l0 = mean_solar_longitude(t);
    let lp = mean_lunar_longitude(t);
    let omega = ascending_lunar_node_longitude(t);
    let lambda = to_radians(apparent_solar_longitude(t, l0).value());

    let theta0 = mean_sidereal_time(t);
    let dpsi = nutation_in_longitude(l0, lp, omega);
    let deps = nutation_in_obliquity(l0, lp, omega);

    let eps0 = mean_obliquity_of_the_ecliptic(t);
    let eps_app = to_radians(apparent_obliquity_of_the_ecliptic(t, eps0).value());

    let declination = to_degrees((eps_app.sin() * lambda.sin()).asin());
    let right_ascension = to_degrees((eps_app.cos() * lambda.sin()).atan2(lambda.cos()));

    // Equation of the equinoxes (Meeus 12.a), carried in arcseconds.
    let equinoxes = (dpsi.value() * 3600.0) * to_radians(eps0.value() + deps.value()).cos();
    let apparent_sidereal_time = theta0.value() + equinoxes / 3600.0;

    SolarPosition {
        declination: Degrees::new(declination),
        right_ascension: CyclicAngle::from_degrees(right_ascension),
        apparent_sidereal_time: Degrees::new(apparent_sidereal_time),
    }
}

impl From<JulianDate> for SolarPosition {
    #[inline]
    fn from(julian_day: JulianDate) -> Self {
        compute_solar_position(julian_day)
    }
}

impl std::fmt::Display for SolarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "δ = {}, α = {}, θ = {}",
            self.declination, self.right_ascension, self.apparent_sidereal_time
        )
    }
}

#[cfg(feature = "serde")]
impl Serialize for SolarPosition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("SolarPosition", 3)?;
        s.serialize_field("declination", &self.declination.value())?;
        s.serialize_field("right_ascension", &self.right_ascension.value())?;
        s.serialize_field("apparent_sidereal_time", &self.apparent_sidereal_time.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SolarPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            declination: f64,
            right_ascension: f64,
            apparent_sidereal_time: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(SolarPosition {
            declination: Degrees::new(raw.declination),
            right_ascension: CyclicAngle::from_degrees(raw.right_ascension),
            apparent_sidereal_time: Degrees::new(raw.apparent_sidereal_time),
        })
    }
}
