// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The SQLite implementation of [`QueryGateway`].
//!
//! Statements arrive with `?` placeholders and typed parameters. Values are
//! always bound, never spliced into the SQL text.

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use liftbook::{
    ChangeKind, GatewayError, QueryGateway, Row, SelectQuery, SqlValue, Statement, WriteIntent,
    WriteOutcome,
};
use liftbook_audit::AuditEntry;
use num_traits::ToPrimitive;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::Persistence;
use crate::backend::PersistenceBackend;
use crate::connectivity::classify;
use crate::dynamic_row::DynamicRow;
use crate::error::PersistenceError;
use crate::mutations;
use crate::notifications::DataChanged;
use crate::statistics::QueryStatistics;

type BoundQuery = BoxedSqlQuery<'static, Sqlite, SqlQuery>;

fn bind_param(query: BoundQuery, value: &SqlValue) -> BoundQuery {
    match value {
        SqlValue::Null => query.bind::<Nullable<Text>, _>(None::<String>),
        SqlValue::Text(text) => query.bind::<Text, _>(text.clone()),
        SqlValue::Integer(value) => query.bind::<BigInt, _>(*value),
        SqlValue::Real(value) => query.bind::<Double, _>(*value),
    }
}

fn prepare<'p>(sql: &str, params: impl IntoIterator<Item = &'p SqlValue>) -> BoundQuery {
    params
        .into_iter()
        .fold(diesel::sql_query(sql).into_boxed::<Sqlite>(), bind_param)
}

fn query_error(sql: &str, err: &diesel::result::Error) -> GatewayError {
    let message: String = err.to_string();
    match classify(&message) {
        Some(fault) => GatewayError::Connectivity(fault),
        None => GatewayError::Query {
            message,
            query: sql.to_string(),
        },
    }
}

fn bytes_sent<'p>(sql: &str, params: impl IntoIterator<Item = &'p SqlValue>) -> u64 {
    let payload: usize = sql.len() + params.into_iter().map(SqlValue::payload_len).sum::<usize>();
    to_u64(payload)
}

fn to_u64(value: usize) -> u64 {
    value.to_u64().unwrap_or(u64::MAX)
}

fn elapsed_us(elapsed: Duration) -> u64 {
    elapsed.as_micros().to_u64().unwrap_or(u64::MAX)
}

/// Runs a write and, for an INSERT, reads back the generated identity.
fn execute_statement(
    conn: &mut SqliteConnection,
    statement: &Statement,
    sql: &str,
) -> Result<WriteOutcome, GatewayError> {
    let rows_affected: usize = prepare(sql, statement.params())
        .execute(conn)
        .map_err(|e| query_error(sql, &e))?;

    let inserted_id: Option<i64> = match statement {
        Statement::Insert { .. } if rows_affected > 0 => Some(conn.get_last_insert_rowid()?),
        _ => None,
    };

    Ok(WriteOutcome {
        rows_affected,
        inserted_id,
    })
}

impl Persistence {
    fn record_call(&mut self, call: QueryStatistics) {
        self.call_count += 1;
        self.statistics += call;
    }

    fn notify(&self, intent: WriteIntent, outcome: &WriteOutcome) {
        if outcome.rows_affected == 0 {
            return;
        }
        let mut event: DataChanged = DataChanged::from(intent);
        if event.kind == ChangeKind::Insert {
            event.row_id = outcome.inserted_id;
        }
        self.changes.broadcast(&event);
    }
}

impl QueryGateway for Persistence {
    fn select(&mut self, query: &SelectQuery) -> Result<Vec<Row>, GatewayError> {
        let sql: &str = query.sql();
        debug!(sql, params = query.params().len(), "Running select");

        let started: Instant = Instant::now();
        let result: Result<Vec<DynamicRow>, diesel::result::Error> =
            prepare(sql, query.params()).load::<DynamicRow>(&mut self.conn);
        let elapsed: Duration = started.elapsed();

        let mut call: QueryStatistics = QueryStatistics::single_call(1, elapsed);
        call.bytes_sent = bytes_sent(sql, query.params());

        let rows: Vec<Row> = match result {
            Ok(rows) => rows.into_iter().map(Row::from).collect(),
            Err(err) => {
                self.record_call(call);
                warn!(sql, error = %err, "Select failed");
                return Err(query_error(sql, &err));
            }
        };

        call.rows_selected = to_u64(rows.len());
        call.bytes_received = to_u64(rows.iter().map(Row::payload_len).sum());
        self.record_call(call);

        debug!(rows = rows.len(), elapsed_us = elapsed_us(elapsed), "Select complete");
        Ok(rows)
    }

    fn execute(&mut self, statement: &Statement) -> Result<WriteOutcome, GatewayError> {
        let sql: String = statement.sql();
        let intent: WriteIntent = statement.intent();
        debug!(sql = %sql, table = %intent.table, kind = %intent.kind, "Executing statement");

        let started: Instant = Instant::now();
        let result: Result<WriteOutcome, GatewayError> =
            execute_statement(&mut self.conn, statement, &sql);
        let elapsed: Duration = started.elapsed();

        let round_trips: u64 = if matches!(statement, Statement::Insert { .. }) {
            2
        } else {
            1
        };
        let mut call: QueryStatistics = QueryStatistics::single_call(round_trips, elapsed);
        call.bytes_sent = bytes_sent(&sql, statement.params());

        match result {
            Ok(outcome) => {
                call.rows_affected = to_u64(outcome.rows_affected);
                self.record_call(call);
                debug!(
                    table = %intent.table,
                    rows = outcome.rows_affected,
                    row_id = outcome.inserted_id.or(intent.row_id),
                    elapsed_us = elapsed_us(elapsed),
                    "Statement complete"
                );
                self.notify(intent, &outcome);
                Ok(outcome)
            }
            Err(err) => {
                self.record_call(call);
                warn!(table = %intent.table, error = %err, "Statement failed");
                Err(err)
            }
        }
    }

    fn record_audit(&mut self, entry: &AuditEntry) -> Result<(), GatewayError> {
        let started: Instant = Instant::now();
        let result: Result<i64, PersistenceError> =
            mutations::persist_audit_entry(&mut self.conn, entry);
        let elapsed: Duration = started.elapsed();

        let mut call: QueryStatistics = QueryStatistics::single_call(2, elapsed);
        if result.is_ok() {
            call.rows_affected = 1;
        }
        self.record_call(call);

        result.map(|_| ()).map_err(GatewayError::from)
    }

    fn user_name(&self) -> &str {
        &self.settings.user_name
    }
}
