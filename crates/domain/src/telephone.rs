// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A ten-digit North American telephone number with an optional extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelephoneNumber {
    area_code: u16,
    exchange: u16,
    line: u16,
    extension: Option<u32>,
}

impl TelephoneNumber {
    /// Creates a number from its three groups.
    ///
    /// # Errors
    ///
    /// Returns an error if a group has more digits than its width allows.
    pub fn new(
        area_code: u16,
        exchange: u16,
        line: u16,
        extension: Option<u32>,
    ) -> Result<Self, DomainError> {
        if area_code > 999 || exchange > 999 || line > 9999 {
            let input: String = format!("{area_code:03}-{exchange:03}-{line:04}");
            let digits: usize = input.chars().filter(char::is_ascii_digit).count();
            return Err(DomainError::InvalidTelephoneNumber { input, digits });
        }
        Ok(Self {
            area_code,
            exchange,
            line,
            extension,
        })
    }

    /// Parses free-form input, returning `None` when it holds no digits.
    ///
    /// Punctuation is ignored. An extension may follow `x` or `ext`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTelephoneNumber` if the input has digits
    /// but not exactly ten of them before the extension.
    pub fn parse_optional(input: &str) -> Result<Option<Self>, DomainError> {
        let lowered: String = input.to_lowercase();
        let (main, extension) = lowered
            .find("ext")
            .or_else(|| lowered.find('x'))
            .map_or((lowered.as_str(), ""), |pos| lowered.split_at(pos));

        let digits: Vec<u8> = main
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        if digits.is_empty() {
            return Ok(None);
        }
        if digits.len() != 10 {
            return Err(DomainError::InvalidTelephoneNumber {
                input: input.to_string(),
                digits: digits.len(),
            });
        }

        let group = |range: std::ops::Range<usize>| -> u16 {
            digits[range]
                .iter()
                .fold(0_u16, |acc, d| acc * 10 + u16::from(*d))
        };

        let extension_digits: String = extension.chars().filter(char::is_ascii_digit).collect();
        let extension: Option<u32> = extension_digits.parse().ok();

        Ok(Some(Self {
            area_code: group(0..3),
            exchange: group(3..6),
            line: group(6..10),
            extension,
        }))
    }

    #[must_use]
    pub const fn area_code(&self) -> u16 {
        self.area_code
    }

    #[must_use]
    pub const fn exchange(&self) -> u16 {
        self.exchange
    }

    #[must_use]
    pub const fn line(&self) -> u16 {
        self.line
    }

    #[must_use]
    pub const fn extension(&self) -> Option<u32> {
        self.extension
    }
}

impl std::fmt::Display for TelephoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:03}) {:03}-{:04}",
            self.area_code, self.exchange, self.line
        )?;
        if let Some(extension) = self.extension {
            write!(f, " x{extension}")?;
        }
        Ok(())
    }
}

/// Strict parse: blank input is an error here, unlike [`TelephoneNumber::parse_optional`].
impl FromStr for TelephoneNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_optional(s)?.ok_or_else(|| DomainError::InvalidTelephoneNumber {
            input: s.to_string(),
            digits: 0,
        })
    }
}
