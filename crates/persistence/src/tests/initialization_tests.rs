// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_company, create_test_persistence};
use crate::{Persistence, PersistenceError};
use liftbook::{Company, QueryGateway, Record, Row};

#[test]
fn test_new_in_memory_runs_migrations() {
    let mut persistence: Persistence = create_test_persistence();
    let tables: Vec<Row> = persistence
        .select_columns("name", "sqlite_master", None)
        .unwrap();
    let names: Vec<String> = tables.iter().map(|row| row.text("name")).collect();

    for table in [
        "company",
        "building",
        "contact",
        "elevator",
        "inspection",
        "contact_company",
        "contact_building",
        "edit_log",
    ] {
        assert!(names.iter().any(|n| n == table), "missing table {table}");
    }
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = create_test_persistence();
    let mut second: Persistence = create_test_persistence();

    create_test_company(&mut first, "Acme Elevator");

    assert_eq!(Company::load_all(&mut first).unwrap().len(), 1);
    assert!(Company::load_all(&mut second).unwrap().is_empty());
}

#[test]
fn test_new_with_file_creates_database() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "liftbook_init_{}_{}.db",
        std::process::id(),
        line!()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_company(&mut persistence, "Harbor Lift");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let companies: Vec<Company> = Company::load_all(&mut reopened).unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name(), "Harbor Lift");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[test]
fn test_unreachable_database_fails_to_open() {
    let result: Result<Persistence, PersistenceError> =
        Persistence::new_with_file("/nonexistent-dir/liftbook/records.db");
    assert!(matches!(
        result,
        Err(PersistenceError::DatabaseConnectionFailed(_))
    ));
}
