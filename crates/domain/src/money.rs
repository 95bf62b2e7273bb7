// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A monetary amount in US dollars.
///
/// Zero doubles as "no amount recorded" for fee fields; see [`Self::is_zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Money {
    value: Decimal,
}

impl Money {
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self {
            value: Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Lossy conversion for binding into a floating-point column.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }

    /// Builds an amount from a float. Non-finite input yields zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self {
            value: Decimal::from_f64_retain(value)
                .map(|d| d.round_dp(2))
                .unwrap_or_default(),
        }
    }
}

/// Formats as currency: `$1,200.50`, `-$5.00`.
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.value.is_sign_negative() && !self.value.is_zero() {
            "-"
        } else {
            ""
        };
        let Some(cents) = self
            .value
            .abs()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.round().to_i128())
        else {
            return write!(f, "{sign}${}", self.value.abs());
        };

        let whole: String = (cents / 100).to_string();
        let mut grouped: String = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{sign}${grouped}.{:02}", cents % 100)
    }
}

/// Accepts plain decimals and currency text (`1200.5`, `$1,200.50`).
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
            .collect();
        Decimal::from_str(&cleaned)
            .map(Self::new)
            .map_err(|_| DomainError::InvalidMoney(s.to_string()))
    }
}
