// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed column values.
//!
//! A [`ColumnValue`] pairs a column name with a value that has already been
//! normalized for storage. The normalization rules are where "not set"
//! sentinels become SQL NULL:
//!
//! - text: `None` is NULL, anything else is kept verbatim
//! - integer: `None` is NULL
//! - timestamp: `None` or anything before [`EPOCH_FLOOR`] is NULL
//! - double and money: exactly zero is NULL
//!
//! Values are bound as statement parameters. [`ColumnValue::sanitized`]
//! and [`ColumnValue::literal`] render the legacy inline form for logging.

use crate::error::QueryError;
use liftbook_domain::Money;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use time::macros::{datetime, format_description};

/// Earliest date treated as real. Anything before it means "not set".
pub const EPOCH_FLOOR: PrimitiveDateTime = datetime!(2000-01-01 0:00);

/// Inline text for a NULL value.
pub const NULL_LITERAL: &str = "NULL";

/// A value ready to bind into a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Approximate size of the value on the wire.
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Text(text) => text.len(),
            Self::Integer(_) | Self::Real(_) => 8,
        }
    }

    /// Renders the value with single quotes doubled, or `NULL`.
    #[must_use]
    pub fn sanitized(&self) -> String {
        match self {
            Self::Null => NULL_LITERAL.to_string(),
            Self::Text(text) => text.replace('\'', "''"),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => value.to_string(),
        }
    }

    /// Renders the value as an inline SQL literal.
    #[must_use]
    pub fn literal(&self) -> String {
        match self {
            Self::Null => NULL_LITERAL.to_string(),
            _ => format!("'{}'", self.sanitized()),
        }
    }
}

/// Formats a timestamp the way it is stored: `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    value
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default()
}

/// A column name and its normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    column: String,
    value: SqlValue,
}

impl ColumnValue {
    fn build(column: &str, value: SqlValue) -> Result<Self, QueryError> {
        if column.trim().is_empty() {
            return Err(QueryError::EmptyColumn);
        }
        if !is_identifier(column) {
            return Err(QueryError::InvalidIdentifier(column.to_string()));
        }
        Ok(Self {
            column: column.to_string(),
            value,
        })
    }

    /// A text column. `None` stores NULL; an empty string stores `''`.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    pub fn text(column: &str, value: Option<&str>) -> Result<Self, QueryError> {
        Self::build(
            column,
            value.map_or(SqlValue::Null, |text| SqlValue::Text(text.to_string())),
        )
    }

    /// An integer column.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    pub fn integer(column: &str, value: Option<i64>) -> Result<Self, QueryError> {
        Self::build(column, value.map_or(SqlValue::Null, SqlValue::Integer))
    }

    /// A timestamp column. Dates before [`EPOCH_FLOOR`] store NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    pub fn timestamp(column: &str, value: Option<PrimitiveDateTime>) -> Result<Self, QueryError> {
        let value: SqlValue = match value {
            Some(stamp) if stamp >= EPOCH_FLOOR => SqlValue::Text(format_timestamp(stamp)),
            _ => SqlValue::Null,
        };
        Self::build(column, value)
    }

    /// A floating-point column. Zero stores NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    #[allow(clippy::float_cmp)]
    pub fn double(column: &str, value: f64) -> Result<Self, QueryError> {
        let value: SqlValue = if value == 0.0 || !value.is_finite() {
            SqlValue::Null
        } else {
            SqlValue::Real(value)
        };
        Self::build(column, value)
    }

    /// A currency column. Zero stores NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    pub fn money(column: &str, value: Money) -> Result<Self, QueryError> {
        if value.is_zero() {
            return Self::build(column, SqlValue::Null);
        }
        Self::build(column, SqlValue::Text(value.value().to_string()))
    }

    /// A boolean column, stored as 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is empty or not a plain identifier.
    pub fn boolean(column: &str, value: bool) -> Result<Self, QueryError> {
        Self::build(column, SqlValue::Integer(i64::from(value)))
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        &self.value
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// The value with single quotes doubled, or `NULL`.
    #[must_use]
    pub fn sanitized(&self) -> String {
        self.value.sanitized()
    }

    /// The value as an inline SQL literal: quoted, or bare `NULL`.
    #[must_use]
    pub fn literal(&self) -> String {
        self.value.literal()
    }
}

/// True for `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
