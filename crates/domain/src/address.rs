// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Postal abbreviations accepted as a state code: the 50 states, the
/// District of Columbia, and the inhabited territories.
const STATE_CODES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC", "PR", "GU", "VI", "AS", "MP",
];

/// A two-letter postal state code.
///
/// Matching is case-insensitive; the stored value is always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateCode {
    code: String,
}

impl StateCode {
    /// Creates a validated state code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateCode` if the code is not in the closed set.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let normalized: String = code.trim().to_uppercase();
        if STATE_CODES.contains(&normalized.as_str()) {
            Ok(Self { code: normalized })
        } else {
            Err(DomainError::InvalidStateCode(code.to_string()))
        }
    }

    /// Returns the uppercase code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// A street address.
///
/// Equality is structural: an address parsed from text equals one built
/// from the same parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    state: StateCode,
    zip: String,
}

impl Address {
    /// Creates a validated address.
    ///
    /// # Arguments
    ///
    /// * `street` - Street line, must not be blank
    /// * `city` - City, must not be blank
    /// * `state` - Two-letter state code (any case)
    /// * `zip` - Five-digit zip code
    ///
    /// # Errors
    ///
    /// Returns an error if any part fails validation. Nothing is constructed
    /// on failure.
    pub fn new(street: &str, city: &str, state: &str, zip: &str) -> Result<Self, DomainError> {
        let street: &str = street.trim();
        let city: &str = city.trim();
        if street.is_empty() {
            return Err(DomainError::InvalidAddress(String::from(
                "Street cannot be empty",
            )));
        }
        if city.is_empty() {
            return Err(DomainError::InvalidAddress(String::from(
                "City cannot be empty",
            )));
        }

        let state: StateCode = StateCode::new(state)?;
        let zip: String = validate_zip(zip)?;

        Ok(Self {
            street: street.to_string(),
            city: city.to_string(),
            state,
            zip,
        })
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub const fn state(&self) -> &StateCode {
        &self.state
    }

    #[must_use]
    pub fn zip(&self) -> &str {
        &self.zip
    }
}

fn validate_zip(zip: &str) -> Result<String, DomainError> {
    let zip: &str = zip.trim();
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(zip.to_string())
    } else {
        Err(DomainError::InvalidZipCode(zip.to_string()))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip
        )
    }
}

/// Parses the `Display` form: `street, city, ST 12345`.
///
/// The street may itself contain commas; only the last two separate fields.
impl FromStr for Address {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ',');
        let (Some(state_zip), Some(city), Some(street)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DomainError::InvalidAddress(format!(
                "expected 'street, city, ST zip', got '{s}'"
            )));
        };

        let mut state_zip = state_zip.split_whitespace();
        let (Some(state), Some(zip), None) = (state_zip.next(), state_zip.next(), state_zip.next())
        else {
            return Err(DomainError::InvalidAddress(format!(
                "expected 'ST zip' after the city, got '{s}'"
            )));
        };

        Self::new(street, city, state, zip)
    }
}
