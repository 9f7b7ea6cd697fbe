// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian calendar ↔ Julian Day arithmetic.
//!
//! The raw formulas ([`julian_day`], [`julian_century`], [`is_leap_year`])
//! work on plain numbers and never fail; they assume the caller has already
//! validated the calendar date.  [`JulianDate`] wraps the result in a typed
//! [`Days`] quantity and adds the checked constructors, the inverse transform
//! and the `chrono` boundary.
//!
//! All dates are proleptic Gregorian: the century correction is applied for
//! every year, including those before the 1582 reform.

use crate::angle::truncate;
use crate::error::{SolarError, SolarResult};
use chrono::{Datelike, NaiveDate};
use qtty::*;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Raw formulas
// ═══════════════════════════════════════════════════════════════════════════

/// The Julian Day at 0h of a Gregorian calendar date (Meeus eq. 7.1).
///
/// January and February are counted as months 13 and 14 of the previous
/// year.  Every integer division uses truncation toward zero.
pub fn julian_day(year: i32, month: u32, day: u32) -> f64 {
    let (y, m) = if month > 2 {
        (f64::from(year), f64::from(month))
    } else {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    };

    let a = truncate(y / 100.0);
    let b = 2.0 - a + truncate(a / 4.0);

    let i0 = truncate(365.25 * (y + 4716.0));
    let i1 = truncate(30.6001 * (m + 1.0));

    i0 + i1 + f64::from(day) + b - 1524.5
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - 2_451_545.0) / 36_525.0
}

/// Gregorian leap-year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    if year % 4 != 0 {
        return false;
    }
    !(year % 100 == 0 && year % 400 != 0)
}

/// Ordinal day of the year, `1` for January 1st.
///
/// Returns `None` for dates that do not exist.
pub fn day_of_year(year: i32, month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.ordinal())
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDate
// ═══════════════════════════════════════════════════════════════════════════

/// A Gregorian date whose day carries the fraction of the day elapsed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// JulianDate
// ═══════════════════════════════════════════════════════════════════════════

/// Julian Day — continuous count of days since the start of the Julian
/// Period, stored as a [`Days`] quantity.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDate {
    quantity: Days,
}

impl JulianDate {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw Julian Day number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// Julian Day at 0h of a calendar date, without validation.
    #[inline]
    pub fn from_calendar(year: i32, month: u32, day: u32) -> Self {
        Self::new(julian_day(year, month, day))
    }

    /// Julian Day at 0h of a calendar date, rejecting dates that do not exist
    /// (day 0, month 13, February 29th of a common year, ...).
    pub fn from_calendar_checked(year: i32, month: u32, day: u32) -> SolarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_date)
            .ok_or(SolarError::InvalidDate { year, month, day })
    }

    /// Julian Day at 0h of a `chrono` date.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_calendar(date.year(), date.month(), date.day())
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying Julian Day number.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Julian centuries since J2000.0; the time argument of every secular
    /// polynomial in [`ephemeris`](crate::ephemeris).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(julian_century(self.value()))
    }

    // ── inverse transforms ────────────────────────────────────────────

    /// Gregorian calendar date of this Julian Day (Meeus ch. 7).
    pub fn to_calendar(&self) -> CalendarDate {
        let jd = self.value() + 0.5;
        let z = truncate(jd);
        let f = jd - z;

        let alpha = truncate((z - 1_867_216.25) / 36_524.25);
        let a = z + 1.0 + alpha - truncate(alpha / 4.0);
        let b = a + 1524.0;
        let c = truncate((b - 122.1) / 365.25);
        let d = truncate(365.25 * c);
        let e = truncate((b - d) / 30.6001);

        let day = b - d - truncate(30.6001 * e) + f;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

        CalendarDate {
            year: year as i32,
            month: month as u32,
            day,
        }
    }

    /// Calendar date containing this Julian Day, or `None` outside chrono's
    /// range.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let calendar = self.to_calendar();
        NaiveDate::from_ymd_opt(calendar.year, calendar.month, calendar.day.floor() as u32)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Julian Day: {}", self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDate {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl Sub<Days> for JulianDate {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl Sub for JulianDate {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ── From / Into ───────────────────────────────────────────────────────────

impl From<Days> for JulianDate {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl From<JulianDate> for Days {
    #[inline]
    fn from(jd: JulianDate) -> Self {
        jd.quantity
    }
}

impl From<Centuries> for JulianDate {
    fn from(centuries: Centuries) -> Self {
        // `Centuries` are interpreted as Julian centuries relative to J2000.
        Self::J2000 + Days::new(centuries.value() * Self::JULIAN_CENTURY.value())
    }
}

impl From<JulianDate> for Centuries {
    fn from(jd: JulianDate) -> Self {
        jd.julian_centuries()
    }
}

impl From<NaiveDate> for JulianDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
