// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer position on the Earth's surface.
//!
//! Longitude is east-positive, so San Francisco sits at about −122.42°.  The
//! transit solver converts internally to the west-positive longitude `Lw`
//! used by Meeus' hour-angle formulas.

use crate::error::{SolarError, SolarResult};
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// A validated geographic latitude/longitude pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinates {
    latitude: Degrees,
    longitude: Degrees,
}

impl Coordinates {
    /// Build a coordinate, rejecting latitudes outside `[-90°, 90°]`,
    /// longitudes outside `[-180°, 180°]` and non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> SolarResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(SolarError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }

    /// Typed variant of [`Coordinates::new`].
    #[inline]
    pub fn from_degrees(latitude: Degrees, longitude: Degrees) -> SolarResult<Self> {
        Self::new(latitude.value(), longitude.value())
    }

    /// Geodetic latitude, positive north.
    #[inline]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// Longitude, positive east.
    #[inline]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Coordinates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Coordinates", 2)?;
        s.serialize_field("latitude", &self.latitude.value())?;
        s.serialize_field("longitude", &self.longitude.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinates::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}
