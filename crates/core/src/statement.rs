// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Statement construction.
//!
//! Statements carry `?` placeholders and an ordered parameter list. Table
//! and column names are checked to be plain identifiers when the statement
//! is built, so nothing caller-supplied is ever spliced into SQL text.

use crate::column_value::{ColumnValue, SqlValue, is_identifier};
use crate::error::QueryError;
use serde::{Deserialize, Serialize};

/// Tables DELETE may target. Entity rows are never deleted.
pub const RELATION_TABLES: [&str; 2] = ["contact_company", "contact_building"];

/// How a write changes the data, as reported to change listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Insert,
    Update,
    /// Anything else, including relation deletes.
    None,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a write touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteIntent {
    pub table: String,
    pub kind: ChangeKind,
    pub row_id: Option<i64>,
}

/// A conjunction of `column = value` terms. NULL values match `IS NULL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    terms: Vec<ColumnValue>,
}

impl Predicate {
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// A single-term predicate.
    #[must_use]
    pub fn eq(term: ColumnValue) -> Self {
        Self { terms: vec![term] }
    }

    /// Adds another term.
    #[must_use]
    pub fn and(mut self, term: ColumnValue) -> Self {
        self.terms.push(term);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn terms(&self) -> &[ColumnValue] {
        &self.terms
    }

    fn sql(&self) -> String {
        self.terms
            .iter()
            .map(|term| {
                if term.is_null() {
                    format!("{} IS NULL", term.column())
                } else {
                    format!("{} = ?", term.column())
                }
            })
            .collect::<Vec<String>>()
            .join(" AND ")
    }

    fn literal_sql(&self) -> String {
        self.terms
            .iter()
            .map(|term| {
                if term.is_null() {
                    format!("{} IS NULL", term.column())
                } else {
                    format!("{} = {}", term.column(), term.literal())
                }
            })
            .collect::<Vec<String>>()
            .join(" AND ")
    }

    fn params(&self) -> impl Iterator<Item = &SqlValue> {
        self.terms
            .iter()
            .map(ColumnValue::value)
            .filter(|value| !value.is_null())
    }
}

/// A write statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Insert {
        table: String,
        values: Vec<ColumnValue>,
    },
    Update {
        table: String,
        values: Vec<ColumnValue>,
        predicate: Predicate,
        row_id: Option<i64>,
    },
    Delete {
        table: String,
        predicate: Predicate,
    },
}

fn checked_table(table: &str) -> Result<String, QueryError> {
    if is_identifier(table) {
        Ok(table.to_string())
    } else {
        Err(QueryError::InvalidIdentifier(table.to_string()))
    }
}

impl Statement {
    /// Builds an INSERT.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is invalid or `values` is empty.
    pub fn insert(table: &str, values: Vec<ColumnValue>) -> Result<Self, QueryError> {
        let table: String = checked_table(table)?;
        if values.is_empty() {
            return Err(QueryError::NoValues(table));
        }
        Ok(Self::Insert { table, values })
    }

    /// Builds an UPDATE. Unconditional updates are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is invalid, `values` is empty, or
    /// the predicate is empty.
    pub fn update(
        table: &str,
        values: Vec<ColumnValue>,
        predicate: Predicate,
    ) -> Result<Self, QueryError> {
        let table: String = checked_table(table)?;
        if values.is_empty() {
            return Err(QueryError::NoValues(table));
        }
        if predicate.is_empty() {
            return Err(QueryError::MissingPredicate(table));
        }
        Ok(Self::Update {
            table,
            values,
            predicate,
            row_id: None,
        })
    }

    /// Builds an UPDATE of one row keyed on its identity column.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid or `values` is empty.
    pub fn update_row(
        table: &str,
        values: Vec<ColumnValue>,
        id_column: &str,
        id: i64,
    ) -> Result<Self, QueryError> {
        let key: ColumnValue = ColumnValue::integer(id_column, Some(id))?;
        let mut statement: Self = Self::update(table, values, Predicate::eq(key))?;
        if let Self::Update { row_id, .. } = &mut statement {
            *row_id = Some(id);
        }
        Ok(statement)
    }

    /// Builds a DELETE against a relation table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in [`RELATION_TABLES`] or the
    /// predicate is empty.
    pub fn delete(table: &str, predicate: Predicate) -> Result<Self, QueryError> {
        if !RELATION_TABLES.contains(&table) {
            return Err(QueryError::DeleteNotPermitted(table.to_string()));
        }
        if predicate.is_empty() {
            return Err(QueryError::MissingPredicate(table.to_string()));
        }
        Ok(Self::Delete {
            table: table.to_string(),
            predicate,
        })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Insert { table, .. } | Self::Update { table, .. } | Self::Delete { table, .. } => {
                table
            }
        }
    }

    /// SQL text with `?` placeholders.
    #[must_use]
    pub fn sql(&self) -> String {
        match self {
            Self::Insert { table, values } => {
                let columns: Vec<&str> = values.iter().map(ColumnValue::column).collect();
                let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
                format!(
                    "INSERT INTO {table}({}) VALUES ({})",
                    columns.join(", "),
                    placeholders.join(", ")
                )
            }
            Self::Update {
                table,
                values,
                predicate,
                ..
            } => {
                let assignments: Vec<String> = values
                    .iter()
                    .map(|value| format!("{}=?", value.column()))
                    .collect();
                format!(
                    "UPDATE {table} SET {} WHERE {}",
                    assignments.join(", "),
                    predicate.sql()
                )
            }
            Self::Delete { table, predicate } => {
                format!("DELETE FROM {table} WHERE {}", predicate.sql())
            }
        }
    }

    /// Parameters in placeholder order.
    #[must_use]
    pub fn params(&self) -> Vec<&SqlValue> {
        match self {
            Self::Insert { values, .. } => values.iter().map(ColumnValue::value).collect(),
            Self::Update {
                values, predicate, ..
            } => values
                .iter()
                .map(ColumnValue::value)
                .chain(predicate.params())
                .collect(),
            Self::Delete { predicate, .. } => predicate.params().collect(),
        }
    }

    /// SQL text with values inlined as sanitized literals. For display only.
    #[must_use]
    pub fn literal_sql(&self) -> String {
        match self {
            Self::Insert { table, values } => {
                let columns: Vec<&str> = values.iter().map(ColumnValue::column).collect();
                let literals: Vec<String> = values.iter().map(ColumnValue::literal).collect();
                format!(
                    "INSERT INTO {table}({}) VALUES ({})",
                    columns.join(", "),
                    literals.join(", ")
                )
            }
            Self::Update {
                table,
                values,
                predicate,
                ..
            } => {
                let assignments: Vec<String> = values
                    .iter()
                    .map(|value| format!("{}={}", value.column(), value.literal()))
                    .collect();
                format!(
                    "UPDATE {table} SET {} WHERE {}",
                    assignments.join(", "),
                    predicate.literal_sql()
                )
            }
            Self::Delete { table, predicate } => {
                format!("DELETE FROM {table} WHERE {}", predicate.literal_sql())
            }
        }
    }

    /// The change this statement makes. Inserts learn their row id later.
    #[must_use]
    pub fn intent(&self) -> WriteIntent {
        let (kind, row_id) = match self {
            Self::Insert { .. } => (ChangeKind::Insert, None),
            Self::Update { row_id, .. } => (ChangeKind::Update, *row_id),
            Self::Delete { .. } => (ChangeKind::None, None),
        };
        WriteIntent {
            table: self.table().to_string(),
            kind,
            row_id,
        }
    }
}

/// A read query with bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    sql: String,
    params: Vec<SqlValue>,
}

impl SelectQuery {
    /// Wraps caller-written SQL. Use `?` placeholders with [`Self::bind`].
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// `SELECT <columns> FROM <table> [WHERE <predicate>]`.
    ///
    /// `columns` is `*` or a comma-separated list of identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the table or any column is not a plain identifier.
    pub fn columns(
        columns: &str,
        table: &str,
        predicate: Option<&Predicate>,
    ) -> Result<Self, QueryError> {
        let table: String = checked_table(table)?;
        let columns: String = if columns.trim() == "*" {
            String::from("*")
        } else {
            let names: Vec<&str> = columns.split(',').map(str::trim).collect();
            if let Some(bad) = names.iter().find(|name| !is_identifier(name)) {
                return Err(QueryError::InvalidIdentifier((*bad).to_string()));
            }
            names.join(", ")
        };

        let mut query: Self = Self::raw(format!("SELECT {columns} FROM {table}"));
        if let Some(predicate) = predicate.filter(|p| !p.is_empty()) {
            query.sql.push_str(" WHERE ");
            query.sql.push_str(&predicate.sql());
            query.params.extend(predicate.params().cloned());
        }
        Ok(query)
    }

    /// Appends a positional parameter.
    #[must_use]
    pub fn bind(mut self, value: SqlValue) -> Self {
        self.params.push(value);
        self
    }

    /// Appends `ORDER BY <column>`.
    ///
    /// # Errors
    ///
    /// Returns an error if `column` is not a plain identifier.
    pub fn order_by(mut self, column: &str) -> Result<Self, QueryError> {
        if !is_identifier(column) {
            return Err(QueryError::InvalidIdentifier(column.to_string()));
        }
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(column);
        Ok(self)
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}
