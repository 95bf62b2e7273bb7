// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when a value fails its domain rules.
///
/// These are raised at the point of assignment, before any field changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// State code is not one of the recognized postal abbreviations.
    InvalidStateCode(String),
    /// Zip code is not exactly five digits.
    InvalidZipCode(String),
    /// Street or city is blank, or an address string could not be split.
    InvalidAddress(String),
    /// Telephone number did not contain exactly ten digits.
    InvalidTelephoneNumber {
        /// The raw input.
        input: String,
        /// How many digits were found.
        digits: usize,
    },
    /// E-mail address does not have a `local@domain.tld` shape.
    InvalidEmail(String),
    /// Latitude or longitude is out of range or unparseable.
    InvalidCoordinates(String),
    /// Monetary amount could not be parsed.
    InvalidMoney(String),
    /// County name is not in the closed set.
    UnknownCounty(String),
    /// Month name is not in the closed set.
    UnknownMonth(String),
    /// Month number is outside 0 through 12.
    InvalidMonthNumber(i64),
    /// Elevator type is not in the closed set.
    UnknownElevatorType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStateCode(code) => write!(f, "Invalid state code: '{code}'"),
            Self::InvalidZipCode(zip) => {
                write!(f, "Invalid zip code: '{zip}'. Must be exactly 5 digits")
            }
            Self::InvalidAddress(msg) => write!(f, "Invalid address: {msg}"),
            Self::InvalidTelephoneNumber { input, digits } => {
                write!(
                    f,
                    "Invalid telephone number '{input}': found {digits} digits, expected 10"
                )
            }
            Self::InvalidEmail(email) => write!(f, "Invalid e-mail address: '{email}'"),
            Self::InvalidCoordinates(msg) => write!(f, "Invalid coordinates: {msg}"),
            Self::InvalidMoney(text) => write!(f, "Invalid monetary amount: '{text}'"),
            Self::UnknownCounty(name) => write!(f, "Unknown county: '{name}'"),
            Self::UnknownMonth(name) => write!(f, "Unknown month: '{name}'"),
            Self::InvalidMonthNumber(number) => {
                write!(
                    f,
                    "Invalid month number: {number}. Must be between 0 and 12"
                )
            }
            Self::UnknownElevatorType(name) => write!(f, "Unknown elevator type: '{name}'"),
        }
    }
}

impl std::error::Error for DomainError {}
