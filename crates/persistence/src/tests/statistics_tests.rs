// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_company, create_test_persistence};
use crate::{Persistence, QueryStatistics};
use liftbook::{ColumnValue, QueryGateway, SelectQuery};
use std::time::Duration;

#[test]
fn test_fresh_connection_has_no_statistics() {
    let persistence: Persistence = create_test_persistence();
    assert_eq!(persistence.call_count(), 0);
    assert_eq!(*persistence.statistics(), QueryStatistics::default());
}

#[test]
fn test_select_accumulates_rows_and_bytes() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_company(&mut persistence, "Acme Elevator");
    create_test_company(&mut persistence, "Harbor Lift");
    persistence.reset_statistics();

    let query: SelectQuery = SelectQuery::raw("SELECT name FROM company ORDER BY company_id");
    persistence.select(&query).unwrap();

    let stats: QueryStatistics = *persistence.statistics();
    assert_eq!(stats.calls, 1);
    assert_eq!(stats.round_trips, 1);
    assert_eq!(stats.rows_selected, 2);
    assert_eq!(stats.bytes_sent, query.sql().len() as u64);
    assert_eq!(
        stats.bytes_received,
        ("name".len() + "Acme Elevator".len() + "name".len() + "Harbor Lift".len()) as u64
    );
}

#[test]
fn test_insert_counts_parameters_and_rows() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .insert(
            "company",
            vec![ColumnValue::text("name", Some("Acme")).unwrap()],
        )
        .unwrap();

    let stats: QueryStatistics = *persistence.statistics();
    let sql: &str = "INSERT INTO company(name) VALUES (?)";
    assert_eq!(stats.calls, 1);
    assert_eq!(stats.round_trips, 2);
    assert_eq!(stats.rows_affected, 1);
    assert_eq!(stats.bytes_sent, (sql.len() + "Acme".len()) as u64);
}

#[test]
fn test_commit_counts_row_write_and_audit_writes() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_company(&mut persistence, "Acme Elevator");

    // duplicate check, insert, one audit row
    assert_eq!(persistence.call_count(), 3);
    assert_eq!(persistence.statistics().calls, 3);
    assert_eq!(persistence.statistics().rows_affected, 2);
}

#[test]
fn test_reset_statistics_keeps_call_count() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_company(&mut persistence, "Acme Elevator");

    persistence.reset_statistics();

    assert_eq!(persistence.statistics().calls, 0);
    assert_eq!(persistence.statistics().execution_time, Duration::ZERO);
    assert_eq!(persistence.call_count(), 3);
}

#[test]
fn test_failed_calls_are_counted() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(
        persistence
            .select(&SelectQuery::raw("SELECT * FROM no_such_table"))
            .is_err()
    );

    assert_eq!(persistence.call_count(), 1);
    assert_eq!(persistence.statistics().rows_selected, 0);
}

#[test]
fn test_statistics_serialize_to_json() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_company(&mut persistence, "Acme Elevator");

    let json: serde_json::Value = serde_json::to_value(persistence.statistics()).unwrap();

    assert_eq!(json["calls"], 3);
    assert!(json.get("execution_time").is_some());
}
