// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_persistence;
use crate::{ChangeBroadcaster, DataChanged, Persistence};
use liftbook::{ChangeKind, ColumnValue, Company, Predicate, QueryGateway, Record, Statement};
use tokio::sync::broadcast;

#[test]
fn test_broadcast_no_receivers() {
    let broadcaster: ChangeBroadcaster = ChangeBroadcaster::new();
    assert_eq!(broadcaster.receiver_count(), 0);
    broadcaster.broadcast(&DataChanged {
        kind: ChangeKind::Insert,
        table: String::from("company"),
        row_id: Some(1),
    });
}

#[test]
fn test_multiple_receivers() {
    let broadcaster: ChangeBroadcaster = ChangeBroadcaster::new();
    let mut rx1: broadcast::Receiver<DataChanged> = broadcaster.subscribe();
    let mut rx2: broadcast::Receiver<DataChanged> = broadcaster.subscribe();

    broadcaster.broadcast(&DataChanged {
        kind: ChangeKind::Update,
        table: String::from("building"),
        row_id: Some(7),
    });

    assert!(matches!(rx1.try_recv(), Ok(DataChanged { kind: ChangeKind::Update, .. })));
    assert!(matches!(rx2.try_recv(), Ok(DataChanged { kind: ChangeKind::Update, .. })));
}

#[test]
fn test_insert_and_update_are_announced_with_row_id() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rx: broadcast::Receiver<DataChanged> = persistence.subscribe();

    let mut company: Company = Company::new("Acme Elevator");
    company.commit_to_database(&mut persistence).unwrap();
    let id: i64 = company.id().unwrap();
    company.set_notes("Annual contract");
    company.commit_to_database(&mut persistence).unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        DataChanged {
            kind: ChangeKind::Insert,
            table: String::from("company"),
            row_id: Some(id),
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        DataChanged {
            kind: ChangeKind::Update,
            table: String::from("company"),
            row_id: Some(id),
        }
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_relation_delete_is_announced_as_none() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = super::create_test_company(&mut persistence, "Acme Elevator");
    let contact_id: i64 = persistence
        .insert(
            "contact",
            vec![
                ColumnValue::text("first_name", Some("Dana")).unwrap(),
                ColumnValue::text("last_name", Some("Reyes")).unwrap(),
            ],
        )
        .unwrap();
    let link: Predicate = Predicate::eq(ColumnValue::integer("contact_id", Some(contact_id)).unwrap())
        .and(ColumnValue::integer("company_id", Some(company_id)).unwrap());
    persistence
        .insert("contact_company", link.terms().to_vec())
        .unwrap();

    let mut rx: broadcast::Receiver<DataChanged> = persistence.subscribe();
    persistence.delete("contact_company", link).unwrap();

    let event: DataChanged = rx.try_recv().unwrap();
    assert_eq!(event.kind, ChangeKind::None);
    assert_eq!(event.table, "contact_company");
    assert_eq!(event.row_id, None);
}

#[test]
fn test_failed_and_empty_writes_are_not_announced() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rx: broadcast::Receiver<DataChanged> = persistence.subscribe();

    let orphan: Statement = Statement::insert(
        "building",
        vec![
            ColumnValue::integer("company_id", Some(999)).unwrap(),
            ColumnValue::text("name", Some("Orphan")).unwrap(),
        ],
    )
    .unwrap();
    assert!(persistence.execute(&orphan).is_err());

    let missing: Statement = Statement::update_row(
        "company",
        vec![ColumnValue::text("notes", Some("nobody")).unwrap()],
        "company_id",
        404,
    )
    .unwrap();
    assert_eq!(persistence.execute(&missing).unwrap().rows_affected, 0);

    assert!(rx.try_recv().is_err());
}
