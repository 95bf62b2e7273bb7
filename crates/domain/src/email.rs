// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An e-mail address with a plausible `local@domain.tld` shape.
///
/// This is a shape check only; deliverability is not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    value: String,
}

impl EmailAddress {
    /// Creates a validated e-mail address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address contains whitespace,
    /// does not have exactly one `@`, has an empty local part, or the domain
    /// has no interior dot.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let value: &str = value.trim();
        let invalid = || DomainError::InvalidEmail(value.to_string());

        if value.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(invalid());
        };
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
            return Err(invalid());
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for EmailAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
