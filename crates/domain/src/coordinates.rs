// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Mean Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Kilometres per statute mile.
const KM_PER_MILE: f64 = 1.609_344;

/// A latitude/longitude pair in decimal degrees.
///
/// `(0.0, 0.0)` is treated as "not set"; see [`Self::is_unset`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeographicCoordinates {
    latitude: f64,
    longitude: f64,
}

impl GeographicCoordinates {
    /// Creates coordinates, rejecting values outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is outside
    /// -90..=90, longitude is outside -180..=180, or either is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// The "not set" value.
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns true when both components are exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Great-circle distance to `other` in statute miles (haversine).
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        let lat1: f64 = self.latitude.to_radians();
        let lat2: f64 = other.latitude.to_radians();
        let d_lat: f64 = (other.latitude - self.latitude).to_radians();
        let d_lon: f64 = (other.longitude - self.longitude).to_radians();

        let a: f64 = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c: f64 = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        self.distance_miles(other) * KM_PER_MILE
    }
}

impl std::fmt::Display for GeographicCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Parses `"latitude, longitude"`.
impl FromStr for GeographicCoordinates {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat, lon)) = s.split_once(',') else {
            return Err(DomainError::InvalidCoordinates(format!(
                "expected 'latitude, longitude', got '{s}'"
            )));
        };
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(format!("bad latitude '{lat}'")))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(format!("bad longitude '{lon}'")))?;
        Self::new(latitude, longitude)
    }
}
