// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Low-precision solar ephemeris terms
//!
//! Secular polynomials and periodic series from *Jean Meeus — Astronomical
//! Algorithms (2nd ed. 1998)*, chapters 12, 22 and 25.  Every function takes
//! the time argument `T` in Julian centuries since J2000.0 (see
//! [`JulianDate::julian_centuries`](crate::JulianDate::julian_centuries)).
//!
//! | Quantity | Symbol | Returns | Meeus |
//! |----------|--------|---------|-------|
//! | mean solar longitude | L0 | [`CyclicAngle`] | 25.2 |
//! | mean lunar longitude | L′ | [`CyclicAngle`] | ch. 22 |
//! | ascending lunar node | Ω | [`CyclicAngle`] | ch. 22 |
//! | mean solar anomaly | M | [`CyclicAngle`] | 25.3 |
//! | equation of the center | C | [`Degrees`] | ch. 25 |
//! | apparent solar longitude | λ | [`CyclicAngle`] | ch. 25 |
//! | mean obliquity | ε0 | [`Degrees`] | 22.2 |
//! | apparent obliquity | ε | [`Degrees`] | 25.8 |
//! | mean sidereal time | Θ0 | [`CyclicAngle`] | 12.4 |
//! | nutation in longitude | Δψ | [`Degrees`] | ch. 22 |
//! | nutation in obliquity | Δε | [`Degrees`] | ch. 22 |
//!
//! Cyclic quantities are unwound into `[0°, 360°)` as soon as they are
//! derived, so that no later step sees an angle many turns away from its
//! canonical value.
//!
//! Nutation uses the four-term truncated series; Meeus quotes its accuracy
//! as 0.5″ in Δψ and 0.1″ in Δε, far below what a sunrise time can resolve.

use crate::angle::{to_radians, CyclicAngle};
use crate::julian::JulianDate;
use qtty::{Centuries, Degrees};

/// Longitude of the Moon's ascending node in the abbreviated form used by
/// the aberration/nutation correction of λ and ε.
#[inline]
fn omega_short(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

// ---------------------------------------------------------------------------
// Mean elements
// ---------------------------------------------------------------------------

/// Geometric mean longitude of the Sun, referred to the mean equinox of date.
pub fn mean_solar_longitude(t: Centuries) -> CyclicAngle {
    let t = t.value();
    CyclicAngle::from_degrees(280.466_456_7 + 36_000.769_83 * t + 0.000_303_2 * t * t)
}

/// Mean longitude of the Moon.
pub fn mean_lunar_longitude(t: Centuries) -> CyclicAngle {
    let t = t.value();
    CyclicAngle::from_degrees(218.3165 + 481_267.8813 * t)
}

/// Longitude of the ascending node of the Moon's mean orbit.
pub fn ascending_lunar_node_longitude(t: Centuries) -> CyclicAngle {
    let t = t.value();
    let t2 = t * t;
    let t3 = t2 * t;
    CyclicAngle::from_degrees(
        125.044_52 - 1934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0,
    )
}

/// Mean anomaly of the Sun.
pub fn mean_solar_anomaly(t: Centuries) -> CyclicAngle {
    let t = t.value();
    CyclicAngle::from_degrees(357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t)
}

/// The Sun's equation of the center for mean anomaly `m`.
pub fn solar_equation_of_the_center(t: Centuries, m: CyclicAngle) -> Degrees {
    let t = t.value();
    let m = to_radians(m.value());

    let term1 = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin();
    let term2 = (0.019_993 - 0.000_101 * t) * (2.0 * m).sin();
    let term3 = 0.000_289 * (3.0 * m).sin();

    Degrees::new(term1 + term2 + term3)
}

/// Apparent longitude of the Sun: true longitude corrected for aberration
/// and nutation.
pub fn apparent_solar_longitude(t: Centuries, mean_longitude: CyclicAngle) -> CyclicAngle {
    let center = solar_equation_of_the_center(t, mean_solar_anomaly(t));
    let true_longitude = mean_longitude.value() + center.value();
    let omega = to_radians(omega_short(t.value()));
    CyclicAngle::from_degrees(true_longitude - 0.005_69 - 0.004_78 * omega.sin())
}

// ---------------------------------------------------------------------------
// Obliquity
// ---------------------------------------------------------------------------

/// Mean obliquity of the ecliptic.
pub fn mean_obliquity_of_the_ecliptic(t: Centuries) -> Degrees {
    let t = t.value();
    let t2 = t * t;
    let t3 = t2 * t;
    Degrees::new(23.439_291 - 0.013_004_167 * t - 0.000_000_163_9 * t2 + 0.000_000_503_6 * t3)
}

/// Apparent obliquity, for computing the apparent position of the Sun.
pub fn apparent_obliquity_of_the_ecliptic(t: Centuries, mean_obliquity: Degrees) -> Degrees {
    let omega = to_radians(omega_short(t.value()));
    Degrees::new(mean_obliquity.value() + 0.002_56 * omega.cos())
}

// ---------------------------------------------------------------------------
// Sidereal time
// ---------------------------------------------------------------------------

/// Mean sidereal time at Greenwich for the instant `t`.
///
/// Evaluated on the Julian Day rather than on `t` directly so that the large
/// linear term keeps its precision.
pub fn mean_sidereal_time(t: Centuries) -> CyclicAngle {
    let jd = JulianDate::from(t);
    let t = t.value();
    let days = jd.value() - JulianDate::J2000.value();
    CyclicAngle::from_degrees(
        280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

// ---------------------------------------------------------------------------
// Nutation
// ---------------------------------------------------------------------------

/// Nutation in longitude, Δψ.
pub fn nutation_in_longitude(
    solar_longitude: CyclicAngle,
    lunar_longitude: CyclicAngle,
    ascending_node: CyclicAngle,
) -> Degrees {
    let l0 = to_radians(solar_longitude.value());
    let lp = to_radians(lunar_longitude.value());
    let om = to_radians(ascending_node.value());

    let arcsec = -17.2 * om.sin() - 1.32 * (2.0 * l0).sin() - 0.23 * (2.0 * lp).sin()
        + 0.21 * (2.0 * om).sin();
    Degrees::new(arcsec / 3600.0)
}

/// Nutation in obliquity, Δε.
pub fn nutation_in_obliquity(
    solar_longitude: CyclicAngle,
    lunar_longitude: CyclicAngle,
    ascending_node: CyclicAngle,
) -> Degrees {
    let l0 = to_radians(solar_longitude.value());
    let lp = to_radians(lunar_longitude.value());
    let om = to_radians(ascending_node.value());

    let arcsec = 9.2 * om.cos() + 0.57 * (2.0 * l0).cos() + 0.10 * (2.0 * lp).cos()
        - 0.09 * (2.0 * om).cos();
    Degrees::new(arcsec / 3600.0)
}
