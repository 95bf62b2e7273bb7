// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::column_value::ColumnValue;
use crate::error::QueryError;
use crate::row::Row;
use crate::statement::{Predicate, SelectQuery, Statement};
use liftbook_audit::AuditEntry;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Connection failures the caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectivityFault {
    /// The server or database file could not be reached.
    HostNotFound,
    /// The server rejected the credentials.
    LoginFailed,
}

impl std::fmt::Display for ConnectivityFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostNotFound => f.write_str("host not found"),
            Self::LoginFailed => f.write_str("login failed"),
        }
    }
}

/// Errors raised by a [`QueryGateway`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Connection failed: {0}")]
    Connectivity(ConnectivityFault),
    /// The database rejected a statement. `query` is the placeholder form.
    #[error("Query failed: {message} (query: {query})")]
    Query { message: String, query: String },
    #[error("Expected exactly {expected} row(s), found {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("Statement rejected: {0}")]
    Rejected(#[from] QueryError),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result of executing a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub rows_affected: usize,
    /// Identity generated by an INSERT.
    pub inserted_id: Option<i64>,
}

/// The only path records take to the database.
///
/// Implementors supply the four primitives; the typed helpers build on them.
pub trait QueryGateway {
    /// Runs a read query.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select(&mut self, query: &SelectQuery) -> Result<Vec<Row>, GatewayError>;

    /// Runs a write statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn execute(&mut self, statement: &Statement) -> Result<WriteOutcome, GatewayError>;

    /// Persists one audit row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    fn record_audit(&mut self, entry: &AuditEntry) -> Result<(), GatewayError>;

    /// The user audit rows are attributed to.
    fn user_name(&self) -> &str;

    /// Time stamp for audit rows.
    fn now(&self) -> PrimitiveDateTime {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        PrimitiveDateTime::new(now.date(), now.time())
    }

    /// `SELECT <columns> FROM <table> [WHERE ...]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid or the query fails.
    fn select_columns(
        &mut self,
        columns: &str,
        table: &str,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<Row>, GatewayError> {
        let query: SelectQuery = SelectQuery::columns(columns, table, predicate)?;
        self.select(&query)
    }

    /// Runs a query that must return exactly one row.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::RowCount` for zero or several rows.
    fn select_single(&mut self, query: &SelectQuery) -> Result<Row, GatewayError> {
        let mut rows: Vec<Row> = self.select(query)?;
        let actual: usize = rows.len();
        match (actual, rows.pop()) {
            (1, Some(row)) => Ok(row),
            _ => Err(GatewayError::RowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Inserts a row and returns its generated identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or produces no identity.
    fn insert(&mut self, table: &str, values: Vec<ColumnValue>) -> Result<i64, GatewayError> {
        let statement: Statement = Statement::insert(table, values)?;
        let outcome: WriteOutcome = self.execute(&statement)?;
        outcome
            .inserted_id
            .ok_or_else(|| GatewayError::Backend(format!("insert into {table} returned no id")))
    }

    /// Updates rows matching `predicate`, returning how many changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the predicate is empty or the update fails.
    fn update(
        &mut self,
        table: &str,
        values: Vec<ColumnValue>,
        predicate: Predicate,
    ) -> Result<usize, GatewayError> {
        let statement: Statement = Statement::update(table, values, predicate)?;
        Ok(self.execute(&statement)?.rows_affected)
    }

    /// Deletes relation rows matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error if `table` is not a relation table or the delete fails.
    fn delete(&mut self, table: &str, predicate: Predicate) -> Result<usize, GatewayError> {
        let statement: Statement = Statement::delete(table, predicate)?;
        Ok(self.execute(&statement)?.rows_affected)
    }
}
