// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle arithmetic and three-point interpolation.
//!
//! Everything the ephemeris and the transit solver need to keep angles in a
//! canonical range:
//!
//! - [`truncate`], [`normalize`], [`unwind_angle`], [`closest_angle`] — range
//!   reduction on raw `f64` degrees.
//! - [`interpolate`] and [`interpolate_angles`] — Bessel-style quadratic
//!   interpolation over three equally spaced samples (Meeus ch. 3).
//! - [`Samples<T>`] — a typed triple `previous / current / next`.  The choice
//!   between the plain and the angle-aware formula is made by the sample type:
//!   `Samples<Degrees>` and `Samples<f64>` interpolate linearly in value,
//!   `Samples<CyclicAngle>` unwinds the first differences so a series that
//!   crosses 360° → 0° is not torn apart.

use qtty::Degrees;
use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Range reduction
// ---------------------------------------------------------------------------

/// Integer part of `x`, truncated toward zero (not toward −∞).
///
/// The Julian-day formulas rely on this: `truncate(-1.5) == -1.0`.
#[inline]
pub fn truncate(x: f64) -> f64 {
    x.trunc()
}

/// Radians → degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    (radians * 180.0) / PI
}

/// Degrees → radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    (degrees * PI) / 180.0
}

/// Reduce `x` into `[0, modulus)`.
///
/// `x - modulus * floor(x / modulus)`, which is well defined for negative `x`.
/// The quotient can round onto the neighbouring integer, leaving the result a
/// hair outside the range; one fold in either direction brings it back.
#[inline]
pub fn normalize(x: f64, modulus: f64) -> f64 {
    let mut y = x - modulus * (x / modulus).floor();
    if y < 0.0 {
        y += modulus;
    }
    if y >= modulus {
        y -= modulus;
    }
    y
}

/// Reduce an angle in degrees into `[0, 360)`.
#[inline]
pub fn unwind_angle(degrees: f64) -> f64 {
    normalize(degrees, 360.0)
}

/// The representative of `degrees` in `[-180, 180]`.
///
/// Values already inside the range are returned unchanged, so both `-180`
/// and `180` are fixed points.
#[inline]
pub fn closest_angle(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    degrees - 360.0 * (degrees / 360.0).round()
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Quadratic interpolation from three equally spaced samples.
///
/// `y1`, `y2`, `y3` are the values at `t-1`, `t0`, `t+1`; `n` is the
/// fractional offset from `t0` (Meeus eq. 3.3).
#[inline]
pub fn interpolate(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = y2 - y1;
    let b = y3 - y2;
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

/// [`interpolate`] for angles in degrees.
///
/// Both first differences are unwound into `[0, 360)` before they are
/// combined, so a monotonically increasing angle that wraps past 360° is
/// interpolated through the wrap instead of across the circle.  The result is
/// not unwound.
#[inline]
pub fn interpolate_angles(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = unwind_angle(y2 - y1);
    let b = unwind_angle(y3 - y2);
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

// ---------------------------------------------------------------------------
// Typed angles and sample triples
// ---------------------------------------------------------------------------

/// An angle that lives on the circle, always stored in `[0°, 360°)`.
///
/// Right ascension, sidereal time and the mean longitudes are cyclic; a
/// declination or an elevation is not.  Keeping the two apart in the type
/// system is what routes a [`Samples`] triple to the right interpolation
/// formula.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct CyclicAngle(Degrees);

impl CyclicAngle {
    /// Wrap `angle` into `[0°, 360°)`.
    #[inline]
    pub fn new(angle: Degrees) -> Self {
        Self(Degrees::new(unwind_angle(angle.value())))
    }

    /// Wrap a raw degree value into `[0°, 360°)`.
    #[inline]
    pub fn from_degrees(degrees: f64) -> Self {
        Self(Degrees::new(unwind_angle(degrees)))
    }

    #[inline]
    pub const fn degrees(&self) -> Degrees {
        self.0
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0.value()
    }
}

impl From<CyclicAngle> for Degrees {
    #[inline]
    fn from(angle: CyclicAngle) -> Self {
        angle.0
    }
}

impl std::fmt::Display for CyclicAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three equally spaced samples of a quantity: the day before, the day, and
/// the day after.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Samples<T> {
    pub previous: T,
    pub current: T,
    pub next: T,
}

impl<T> Samples<T> {
    #[inline]
    pub const fn new(previous: T, current: T, next: T) -> Self {
        Self {
            previous,
            current,
            next,
        }
    }

    /// Project every sample through `f`.
    #[inline]
    pub fn map<U, F>(&self, f: F) -> Samples<U>
    where
        F: Fn(&T) -> U,
    {
        Samples {
            previous: f(&self.previous),
            current: f(&self.current),
            next: f(&self.next),
        }
    }
}

impl Samples<f64> {
    /// Plain quadratic interpolation at offset `n` from `current`.
    #[inline]
    pub fn interpolate(&self, n: f64) -> f64 {
        interpolate(self.current, self.previous, self.next, n)
    }
}

impl Samples<Degrees> {
    /// Plain quadratic interpolation of a non-cyclic angle (declination,
    /// elevation).
    #[inline]
    pub fn interpolate(&self, n: f64) -> Degrees {
        Degrees::new(interpolate(
            self.current.value(),
            self.previous.value(),
            self.next.value(),
            n,
        ))
    }
}

impl Samples<CyclicAngle> {
    /// Angle-aware interpolation, unwound into `[0°, 360°)`.
    #[inline]
    pub fn interpolate(&self, n: f64) -> CyclicAngle {
        CyclicAngle::from_degrees(interpolate_angles(
            self.current.value(),
            self.previous.value(),
            self.next.value(),
            n,
        ))
    }
}
