// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ChangeKind, ColumnValue, Predicate, QueryError, SelectQuery, SqlValue, Statement, WriteIntent,
};

fn values() -> Vec<ColumnValue> {
    vec![
        ColumnValue::text("name", Some("Acme Lift")).unwrap(),
        ColumnValue::text("notes", None).unwrap(),
        ColumnValue::boolean("active", true).unwrap(),
    ]
}

fn by_id(id: i64) -> Predicate {
    Predicate::eq(ColumnValue::integer("company_id", Some(id)).unwrap())
}

#[test]
fn test_insert_sql_and_params() {
    let statement: Statement = Statement::insert("company", values()).unwrap();
    assert_eq!(
        statement.sql(),
        "INSERT INTO company(name, notes, active) VALUES (?, ?, ?)"
    );
    assert_eq!(
        statement.params(),
        vec![
            &SqlValue::Text(String::from("Acme Lift")),
            &SqlValue::Null,
            &SqlValue::Integer(1)
        ]
    );
}

#[test]
fn test_insert_literal_sql() {
    let statement: Statement = Statement::insert(
        "company",
        vec![
            ColumnValue::text("name", Some("Joe's Lifts")).unwrap(),
            ColumnValue::text("notes", None).unwrap(),
        ],
    )
    .unwrap();
    assert_eq!(
        statement.literal_sql(),
        "INSERT INTO company(name, notes) VALUES ('Joe''s Lifts', NULL)"
    );
}

#[test]
fn test_update_sql_puts_predicate_params_last() {
    let statement: Statement = Statement::update("company", values(), by_id(4)).unwrap();
    assert_eq!(
        statement.sql(),
        "UPDATE company SET name=?, notes=?, active=? WHERE company_id = ?"
    );
    assert_eq!(statement.params().last(), Some(&&SqlValue::Integer(4)));
    assert_eq!(
        statement.literal_sql(),
        "UPDATE company SET name='Acme Lift', notes=NULL, active='1' WHERE company_id = '4'"
    );
}

#[test]
fn test_unconditional_update_is_rejected() {
    assert_eq!(
        Statement::update("company", values(), Predicate::new()).unwrap_err(),
        QueryError::MissingPredicate(String::from("company"))
    );
}

#[test]
fn test_write_without_values_is_rejected() {
    assert_eq!(
        Statement::insert("company", Vec::new()).unwrap_err(),
        QueryError::NoValues(String::from("company"))
    );
}

#[test]
fn test_table_name_must_be_identifier() {
    assert!(matches!(
        Statement::insert("company;--", values()),
        Err(QueryError::InvalidIdentifier(_))
    ));
}

#[test]
fn test_delete_only_on_relation_tables() {
    let predicate: Predicate = Predicate::eq(ColumnValue::integer("contact_id", Some(1)).unwrap())
        .and(ColumnValue::integer("company_id", Some(2)).unwrap());

    let statement: Statement = Statement::delete("contact_company", predicate.clone()).unwrap();
    assert_eq!(
        statement.sql(),
        "DELETE FROM contact_company WHERE contact_id = ? AND company_id = ?"
    );

    assert_eq!(
        Statement::delete("company", predicate).unwrap_err(),
        QueryError::DeleteNotPermitted(String::from("company"))
    );
}

#[test]
fn test_null_predicate_term_uses_is_null() {
    let predicate: Predicate = Predicate::eq(ColumnValue::text("county", None).unwrap());
    let statement: Statement = Statement::update(
        "building",
        vec![ColumnValue::boolean("active", false).unwrap()],
        predicate,
    )
    .unwrap();
    assert_eq!(
        statement.sql(),
        "UPDATE building SET active=? WHERE county IS NULL"
    );
    assert_eq!(statement.params().len(), 1);
}

#[test]
fn test_intent_reports_change_kind() {
    assert_eq!(
        Statement::insert("company", values()).unwrap().intent(),
        WriteIntent {
            table: String::from("company"),
            kind: ChangeKind::Insert,
            row_id: None,
        }
    );
    assert_eq!(
        Statement::update_row("company", values(), "company_id", 9)
            .unwrap()
            .intent(),
        WriteIntent {
            table: String::from("company"),
            kind: ChangeKind::Update,
            row_id: Some(9),
        }
    );

    let unlink: Statement = Statement::delete(
        "contact_building",
        Predicate::eq(ColumnValue::integer("contact_id", Some(1)).unwrap()),
    )
    .unwrap();
    assert_eq!(unlink.intent().kind, ChangeKind::None);
}

#[test]
fn test_select_columns_with_predicate() {
    let query: SelectQuery = SelectQuery::columns("name, active", "company", Some(&by_id(3)))
        .unwrap()
        .order_by("name")
        .unwrap();
    assert_eq!(
        query.sql(),
        "SELECT name, active FROM company WHERE company_id = ? ORDER BY name"
    );
    assert_eq!(query.params(), &[SqlValue::Integer(3)]);
}

#[test]
fn test_select_star_without_predicate() {
    let query: SelectQuery = SelectQuery::columns("*", "building", None).unwrap();
    assert_eq!(query.sql(), "SELECT * FROM building");
    assert!(query.params().is_empty());
}

#[test]
fn test_select_rejects_injected_column() {
    assert!(matches!(
        SelectQuery::columns("name, 1=1 --", "company", None),
        Err(QueryError::InvalidIdentifier(_))
    ));
    assert!(SelectQuery::columns("*", "company", None)
        .unwrap()
        .order_by("name desc")
        .is_err());
}

#[test]
fn test_raw_query_binds_in_order() {
    let query: SelectQuery = SelectQuery::raw("SELECT * FROM company WHERE name = ? AND active = ?")
        .bind(SqlValue::Text(String::from("Acme")))
        .bind(SqlValue::Integer(1));
    assert_eq!(query.params().len(), 2);
    assert_eq!(query.params()[1], SqlValue::Integer(1));
}
