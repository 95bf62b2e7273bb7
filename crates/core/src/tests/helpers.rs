// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GatewayError, QueryGateway, Row, SelectQuery, Statement, WriteOutcome};
use liftbook_audit::AuditEntry;
use std::collections::VecDeque;
use time::PrimitiveDateTime;
use time::macros::datetime;

pub const TEST_USER: &str = "inspector";
pub const TEST_NOW: PrimitiveDateTime = datetime!(2026-03-04 09:15:00);

/// Gateway that records what it is asked to do and replays canned rows.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub selects: Vec<SelectQuery>,
    pub statements: Vec<Statement>,
    pub audit: Vec<AuditEntry>,
    /// Result sets handed out by `select`, in order. Empty once drained.
    pub results: VecDeque<Vec<Row>>,
    pub next_id: i64,
    /// Rows reported for UPDATE and DELETE.
    pub rows_affected: usize,
    /// Audit rows for this column fail to write.
    pub fail_audit_column: Option<String>,
    /// Every write fails with a query error.
    pub fail_writes: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            next_id: 100,
            rows_affected: 1,
            ..Self::default()
        }
    }

    pub fn with_results(mut self, rows: Vec<Row>) -> Self {
        self.results.push_back(rows);
        self
    }

    pub fn sql(&self) -> Vec<String> {
        self.statements.iter().map(Statement::sql).collect()
    }
}

impl QueryGateway for RecordingGateway {
    fn select(&mut self, query: &SelectQuery) -> Result<Vec<Row>, GatewayError> {
        self.selects.push(query.clone());
        Ok(self.results.pop_front().unwrap_or_default())
    }

    fn execute(&mut self, statement: &Statement) -> Result<WriteOutcome, GatewayError> {
        if self.fail_writes {
            return Err(GatewayError::Query {
                message: String::from("disk I/O error"),
                query: statement.sql(),
            });
        }
        self.statements.push(statement.clone());
        Ok(match statement {
            Statement::Insert { .. } => {
                let id: i64 = self.next_id;
                self.next_id += 1;
                WriteOutcome {
                    rows_affected: 1,
                    inserted_id: Some(id),
                }
            }
            Statement::Update { .. } | Statement::Delete { .. } => WriteOutcome {
                rows_affected: self.rows_affected,
                inserted_id: None,
            },
        })
    }

    fn record_audit(&mut self, entry: &AuditEntry) -> Result<(), GatewayError> {
        if self.fail_audit_column.as_deref() == Some(entry.column_name.as_str()) {
            return Err(GatewayError::Backend(String::from("audit table locked")));
        }
        self.audit.push(entry.clone());
        Ok(())
    }

    fn user_name(&self) -> &str {
        TEST_USER
    }

    fn now(&self) -> PrimitiveDateTime {
        TEST_NOW
    }
}

/// The stored form of a building as the reporting screens load it.
pub fn building_row() -> Row {
    Row::default()
        .with("Building_ID", Some("7"))
        .with("Company_ID", Some("3"))
        .with("Name", Some("Harbor Point Tower"))
        .with("Street", Some("1 Harbor Point Rd"))
        .with("City", Some("Baltimore"))
        .with("State", Some("md"))
        .with("Zip", Some("21231"))
        .with("County", Some("Prince George's"))
        .with("Latitude", Some("39.2794"))
        .with("Longitude", Some("-76.5967"))
        .with("Firm_Fee", Some("1200.50"))
        .with("Contract_Month", Some("4"))
        .with("Active", Some("True"))
        .with("Notes", None)
}

pub fn company_row(id: &str, name: &str) -> Row {
    Row::default()
        .with("company_id", Some(id))
        .with("name", Some(name))
        .with("street", None)
        .with("phone", Some("4102908913"))
        .with("email", Some("office@acme.test"))
        .with("notes", Some(""))
        .with("active", Some("1"))
}
