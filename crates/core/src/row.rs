// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Result rows.
//!
//! The gateway hands back every value as text. The typed readers here parse
//! defensively: a NULL, an empty string, or an unparseable value yields the
//! type's "not set" value rather than an error. Closed vocabularies are the
//! exception and are parsed by the entities themselves, where an unknown
//! value is a hard error.

use liftbook_domain::Money;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// One result row: column names in select order, each with text or NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Option<String>)>,
}

impl Row {
    #[must_use]
    pub const fn new(columns: Vec<(String, Option<String>)>) -> Self {
        Self { columns }
    }

    /// Appends a column. Used to build rows by hand.
    #[must_use]
    pub fn with(mut self, column: &str, value: Option<&str>) -> Self {
        self.columns
            .push((column.to_string(), value.map(ToString::to_string)));
        self
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Total length of all non-NULL values.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.columns
            .iter()
            .filter_map(|(_, value)| value.as_ref().map(String::len))
            .sum()
    }

    /// Raw value of a column, matched case-insensitively. NULL is `None`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Text value, or the empty string.
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    /// Trimmed text, or `None` when NULL or blank.
    #[must_use]
    pub fn optional_text(&self, column: &str) -> Option<String> {
        self.get(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    #[must_use]
    pub fn optional_integer(&self, column: &str) -> Option<i64> {
        let raw: &str = self.get(column)?.trim();
        raw.parse::<i64>().ok().or_else(|| {
            // Integers read back from a REAL column arrive as "12.0".
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && value.fract().abs() < f64::EPSILON)
                .and_then(|value| format!("{value:.0}").parse().ok())
        })
    }

    /// Integer value, or 0.
    #[must_use]
    pub fn integer(&self, column: &str) -> i64 {
        self.optional_integer(column).unwrap_or_default()
    }

    /// Floating-point value, or 0.0.
    #[must_use]
    pub fn float(&self, column: &str) -> f64 {
        self.get(column)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or_default()
    }

    /// Accepts `True`/`False` in any case, `1`/`0`, and `yes`/`no`.
    /// Anything else is `false`.
    #[must_use]
    pub fn boolean(&self, column: &str) -> bool {
        self.get(column).is_some_and(|raw| {
            matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "y"
            )
        })
    }

    /// Accepts `YYYY-MM-DD HH:MM:SS` (fractional seconds and a `T`
    /// separator are tolerated) or a bare date, read as midnight.
    #[must_use]
    pub fn timestamp(&self, column: &str) -> Option<PrimitiveDateTime> {
        parse_timestamp(self.get(column)?)
    }

    /// Currency value, or zero.
    #[must_use]
    pub fn money(&self, column: &str) -> Money {
        self.get(column)
            .and_then(|raw| raw.parse::<Money>().ok())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let raw: &str = raw.trim();
    let without_fraction: &str = raw.split('.').next().unwrap_or(raw);
    let normalized: String = without_fraction.replacen('T', " ", 1);

    if let Ok(stamp) = PrimitiveDateTime::parse(
        &normalized,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(stamp);
    }
    Date::parse(&normalized, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(Date::midnight)
}
