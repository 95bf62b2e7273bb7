// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records committed and reloaded through a real database.

use super::{TEST_USER, create_test_company, create_test_persistence};
use crate::Persistence;
use liftbook::{
    Building, ColumnValue, Company, Contact, CoreError, Elevator, GatewayError, Inspection,
    Predicate, QueryGateway, Record,
};
use liftbook_audit::AuditEntry;
use liftbook_domain::{Address, County, ElevatorType, GeographicCoordinates, Money, Month};
use time::macros::datetime;

fn create_test_building(persistence: &mut Persistence, company_id: i64) -> Building {
    let mut building: Building = Building::new(company_id, "");
    building.set_name("Harbor Point Tower");
    building.set_address(Address::new("1 Harbor Pt", "Baltimore", "md", "21231").unwrap());
    building.set_county_name("Prince George's").unwrap();
    building.set_coordinates(GeographicCoordinates::new(39.28, -76.6).unwrap());
    building.set_firm_fee("1200.50".parse::<Money>().unwrap());
    building.set_contract_month(Month::April);
    assert!(building.commit_to_database(persistence).unwrap());
    building
}

#[test]
fn test_new_company_insert_backfills_audit_item_id() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_test_company(&mut persistence, "Acme Elevator");

    let history: Vec<AuditEntry> = persistence.edit_history("Company", id).unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].item_id, Some(id));
    assert_eq!(history[0].column_name, "name");
    assert_eq!(history[0].old_value, "");
    assert_eq!(history[0].new_value, "Acme Elevator");
    assert_eq!(history[0].user_name, TEST_USER);
}

#[test]
fn test_hydrated_company_is_not_edited() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_test_company(&mut persistence, "Acme Elevator");

    let company: Company = Company::load(&mut persistence, id).unwrap();

    assert_eq!(company.id(), Some(id));
    assert_eq!(company.name(), "Acme Elevator");
    assert!(company.is_active());
    assert!(!company.is_edited());
}

#[test]
fn test_rename_updates_row_and_appends_history() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_test_company(&mut persistence, "Acme Elevator");

    let mut company: Company = Company::load(&mut persistence, id).unwrap();
    company.set_name("Acme Lift");
    company.set_name("Acme Lift & Escalator");
    assert_eq!(
        company.save_confirmation_text().as_deref(),
        Some("name: Acme Elevator -> Acme Lift & Escalator")
    );
    assert!(company.commit_to_database(&mut persistence).unwrap());
    assert!(!company.is_edited());

    let reloaded: Company = Company::load(&mut persistence, id).unwrap();
    assert_eq!(reloaded.name(), "Acme Lift & Escalator");

    let history: Vec<AuditEntry> = persistence.edit_history("Company", id).unwrap();
    let values: Vec<(&str, &str)> = history
        .iter()
        .map(|entry| (entry.old_value.as_str(), entry.new_value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("", "Acme Elevator"),
            ("Acme Elevator", "Acme Lift & Escalator")
        ]
    );
}

#[test]
fn test_commit_of_missing_row_keeps_edits() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let mut company: Company = Company::load(&mut persistence, id).unwrap();

    persistence
        .update(
            "company",
            vec![ColumnValue::integer("company_id", Some(id + 100)).unwrap()],
            Predicate::eq(ColumnValue::integer("company_id", Some(id)).unwrap()),
        )
        .unwrap();

    company.set_notes("Moved");
    assert!(!company.commit_to_database(&mut persistence).unwrap());
    assert!(company.is_edited());
    assert_eq!(persistence.edit_history("Company", id).unwrap().len(), 1);
}

#[test]
fn test_duplicate_company_name_is_rejected_ignoring_case() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_test_company(&mut persistence, "Acme Elevator");

    let mut duplicate: Company = Company::new("ACME ELEVATOR");
    match duplicate.commit_to_database(&mut persistence) {
        Err(CoreError::DuplicateEntry(existing)) => {
            assert_eq!(existing.existing_id(), Some(id));
        }
        other => panic!("Expected duplicate entry, got {other:?}"),
    }
    assert_eq!(Company::load_all(&mut persistence).unwrap().len(), 1);
}

#[test]
fn test_building_round_trips_through_database() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let building: Building = create_test_building(&mut persistence, company_id);
    let id: i64 = building.id().unwrap();

    let loaded: Building = Building::load(&mut persistence, id).unwrap();

    assert_eq!(loaded.company_id(), company_id);
    assert_eq!(loaded.county(), Some(County::PrinceGeorges));
    assert_eq!(loaded.firm_fee(), "1200.50".parse::<Money>().unwrap());
    assert_eq!(loaded.contract_month(), Month::April);
    assert_eq!(loaded.address().unwrap().state().as_str(), "MD");
    assert!(loaded.is_active());
    assert!(!loaded.is_edited());
}

#[test]
fn test_fees_keep_every_digit_through_database() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let fee: Money = "12345678901234567.89".parse().unwrap();

    let mut building: Building = Building::new(company_id, "Harbor Point Tower");
    building.set_firm_fee(fee);
    assert!(building.commit_to_database(&mut persistence).unwrap());
    let building_id: i64 = building.id().unwrap();

    let loaded: Building = Building::load(&mut persistence, building_id).unwrap();
    assert_eq!(loaded.firm_fee(), fee);
    let history: Vec<AuditEntry> = persistence.edit_history("Building", building_id).unwrap();
    let logged: &AuditEntry = history
        .iter()
        .find(|entry| entry.column_name == "firm_fee")
        .unwrap();
    assert_eq!(logged.old_value, "");
    assert_eq!(logged.new_value, loaded.firm_fee().to_string());

    let mut elevator: Elevator = Elevator::new(building_id, "");
    elevator.set_unit_number("1");
    assert!(elevator.commit_to_database(&mut persistence).unwrap());
    let mut inspection: Inspection =
        Inspection::new(elevator.id().unwrap(), datetime!(2025-04-10 10:00:00));
    let inspection_fee: Money = "0.123456789".parse().unwrap();
    inspection.set_fee(inspection_fee);
    assert!(inspection.commit_to_database(&mut persistence).unwrap());

    let reloaded: Inspection = Inspection::load(&mut persistence, inspection.id().unwrap()).unwrap();
    assert_eq!(reloaded.fee(), inspection_fee);
}

#[test]
fn test_duplicate_building_only_within_company() {
    let mut persistence: Persistence = create_test_persistence();
    let acme: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let harbor: i64 = create_test_company(&mut persistence, "Harbor Lift");
    create_test_building(&mut persistence, acme);

    let mut other_company: Building = Building::new(harbor, "harbor point tower");
    assert!(other_company.commit_to_database(&mut persistence).unwrap());

    let mut same_company: Building = Building::new(acme, "HARBOR POINT TOWER");
    assert!(matches!(
        same_company.commit_to_database(&mut persistence),
        Err(CoreError::DuplicateEntry(_))
    ));
}

#[test]
fn test_children_listed_by_parent() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let building: Building = create_test_building(&mut persistence, company_id);
    let building_id: i64 = building.id().unwrap();

    let mut elevator: Elevator = Elevator::new(building_id, "1");
    elevator.set_elevator_type(ElevatorType::Traction);
    elevator.set_state_id(" md-0412 ");
    elevator.set_capacity(3500);
    assert!(elevator.commit_to_database(&mut persistence).unwrap());
    let elevator_id: i64 = elevator.id().unwrap();

    for (date, passed) in [
        (datetime!(2025-04-10 10:00:00), true),
        (datetime!(2024-04-12 09:30:00), false),
    ] {
        let mut inspection: Inspection = Inspection::new(elevator_id, date);
        inspection.set_inspector("R. Alvarez");
        inspection.set_passed(passed);
        assert!(inspection.commit_to_database(&mut persistence).unwrap());
    }

    let company: Company = Company::load(&mut persistence, company_id).unwrap();
    assert_eq!(company.buildings(&mut persistence).unwrap().len(), 1);

    let elevators: Vec<Elevator> = building.elevators(&mut persistence).unwrap();
    assert_eq!(elevators.len(), 1);
    assert_eq!(elevators[0].state_id(), "MD-0412");
    assert_eq!(elevators[0].elevator_type(), Some(ElevatorType::Traction));

    let inspections: Vec<Inspection> = elevators[0].inspections(&mut persistence).unwrap();
    assert_eq!(inspections.len(), 2);
    assert_eq!(
        inspections[0].inspection_date(),
        Some(datetime!(2024-04-12 09:30:00))
    );
    assert!(!inspections[0].passed());
    assert!(inspections[1].passed());
}

#[test]
fn test_renewing_in_filters_by_month() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    create_test_building(&mut persistence, company_id);

    assert_eq!(
        Building::renewing_in(&mut persistence, Month::April)
            .unwrap()
            .len(),
        1
    );
    assert!(
        Building::renewing_in(&mut persistence, Month::May)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_contact_links_are_idempotent_and_removable() {
    let mut persistence: Persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "Acme Elevator");
    let building: Building = create_test_building(&mut persistence, company_id);
    let building_id: i64 = building.id().unwrap();

    let mut contact: Contact = Contact::new("Dana", "Reyes");
    contact.set_title("Property Manager");
    assert!(contact.commit_to_database(&mut persistence).unwrap());

    assert!(contact.link_company(&mut persistence, company_id).unwrap());
    assert!(!contact.link_company(&mut persistence, company_id).unwrap());
    assert!(contact.link_building(&mut persistence, building_id).unwrap());

    assert_eq!(contact.company_ids(&mut persistence).unwrap(), vec![company_id]);
    assert_eq!(contact.building_ids(&mut persistence).unwrap(), vec![building_id]);
    let linked: Vec<Contact> = Contact::for_company(&mut persistence, company_id).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].to_string(), "Dana Reyes, Property Manager");

    assert!(contact.unlink_company(&mut persistence, company_id).unwrap());
    assert!(!contact.unlink_company(&mut persistence, company_id).unwrap());
    assert!(contact.company_ids(&mut persistence).unwrap().is_empty());
    assert_eq!(Contact::for_building(&mut persistence, building_id).unwrap().len(), 1);
}

#[test]
fn test_load_of_missing_identity_is_row_count_error() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<Company, CoreError> = Company::load(&mut persistence, 42);

    assert!(matches!(
        result,
        Err(CoreError::Gateway(GatewayError::RowCount {
            expected: 1,
            actual: 0
        }))
    ));
}
