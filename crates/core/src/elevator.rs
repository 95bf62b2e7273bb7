// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::column_value::{ColumnValue, EPOCH_FLOOR};
use crate::error::CoreError;
use crate::gateway::QueryGateway;
use crate::inspection::Inspection;
use crate::record::{Record, TrackedRecord};
use crate::row::Row;
use crate::statement::Predicate;
use liftbook_domain::{DomainError, ElevatorType};
use time::PrimitiveDateTime;

/// One conveyance in a building.
///
/// `state_id` is the number the state assigns to the unit; it is trimmed and
/// uppercased on write. `capacity` is in pounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elevator {
    tracked: TrackedRecord,
    building_id: i64,
    unit_number: String,
    elevator_type: Option<ElevatorType>,
    state_id: String,
    capacity: i64,
    floors: i64,
    install_date: Option<PrimitiveDateTime>,
    notes: String,
}

impl Elevator {
    #[must_use]
    pub fn new(building_id: i64, unit_number: &str) -> Self {
        Self {
            tracked: TrackedRecord::new(Self::NAME),
            building_id,
            unit_number: unit_number.trim().to_string(),
            elevator_type: None,
            state_id: String::new(),
            capacity: 0,
            floors: 0,
            install_date: None,
            notes: String::new(),
        }
    }

    #[must_use]
    pub const fn building_id(&self) -> i64 {
        self.building_id
    }

    #[must_use]
    pub fn unit_number(&self) -> &str {
        &self.unit_number
    }

    #[must_use]
    pub const fn elevator_type(&self) -> Option<ElevatorType> {
        self.elevator_type
    }

    #[must_use]
    pub fn state_id(&self) -> &str {
        &self.state_id
    }

    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.capacity
    }

    #[must_use]
    pub const fn floors(&self) -> i64 {
        self.floors
    }

    #[must_use]
    pub const fn install_date(&self) -> Option<PrimitiveDateTime> {
        self.install_date
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_building_id(&mut self, building_id: i64) -> bool {
        self.tracked
            .set_integer("building_id", &mut self.building_id, building_id)
    }

    pub fn set_unit_number(&mut self, unit_number: &str) -> bool {
        self.tracked
            .set_text("unit_number", &mut self.unit_number, unit_number)
    }

    pub fn set_elevator_type(&mut self, elevator_type: ElevatorType) -> bool {
        self.tracked
            .set_optional("elevator_type", &mut self.elevator_type, elevator_type)
    }

    /// Sets the type from its display name. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownElevatorType` for an unknown name.
    pub fn set_elevator_type_name(&mut self, name: &str) -> Result<bool, DomainError> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.set_elevator_type(name.parse()?))
    }

    pub fn set_state_id(&mut self, state_id: &str) -> bool {
        self.tracked.set_text(
            "state_id",
            &mut self.state_id,
            &state_id.trim().to_uppercase(),
        )
    }

    pub fn set_capacity(&mut self, pounds: i64) -> bool {
        self.tracked.set_integer("capacity", &mut self.capacity, pounds)
    }

    pub fn set_floors(&mut self, floors: i64) -> bool {
        self.tracked.set_integer("floors", &mut self.floors, floors)
    }

    pub fn set_install_date(&mut self, date: PrimitiveDateTime) -> bool {
        self.tracked
            .set_timestamp("install_date", &mut self.install_date, date)
    }

    pub fn set_notes(&mut self, notes: &str) -> bool {
        self.tracked.set_text("notes", &mut self.notes, notes)
    }

    /// Elevators in a building, in identity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn for_building<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        building_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        let predicate: Predicate =
            Predicate::eq(ColumnValue::integer("building_id", Some(building_id))?);
        Self::load_where(gateway, Some(&predicate))
    }

    /// Inspections of this elevator, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn inspections<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
    ) -> Result<Vec<Inspection>, CoreError> {
        match self.id() {
            Some(id) => Inspection::for_elevator(gateway, id),
            None => Ok(Vec::new()),
        }
    }
}

impl Record for Elevator {
    const NAME: &'static str = "Elevator";
    const TABLE: &'static str = "elevator";
    const ID_COLUMN: &'static str = "elevator_id";

    fn tracked(&self) -> &TrackedRecord {
        &self.tracked
    }

    fn tracked_mut(&mut self) -> &mut TrackedRecord {
        &mut self.tracked
    }

    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError> {
        Ok(vec![
            ColumnValue::integer("building_id", Some(self.building_id))?,
            ColumnValue::text("unit_number", Some(&self.unit_number))?,
            ColumnValue::text(
                "elevator_type",
                self.elevator_type.as_ref().map(ElevatorType::as_str),
            )?,
            ColumnValue::text("state_id", Some(&self.state_id))?,
            ColumnValue::integer("capacity", Some(self.capacity).filter(|c| *c != 0))?,
            ColumnValue::integer("floors", Some(self.floors).filter(|f| *f != 0))?,
            ColumnValue::timestamp("install_date", self.install_date)?,
            ColumnValue::text("notes", Some(&self.notes))?,
        ])
    }

    fn from_row(row: &Row) -> Result<Self, CoreError> {
        let elevator_type: Option<ElevatorType> = row
            .optional_text("elevator_type")
            .map(|name| name.parse::<ElevatorType>())
            .transpose()?;
        Ok(Self {
            tracked: TrackedRecord::hydrated(Self::NAME, row.optional_integer(Self::ID_COLUMN)),
            building_id: row.integer("building_id"),
            unit_number: row.text("unit_number"),
            elevator_type,
            state_id: row.text("state_id"),
            capacity: row.integer("capacity"),
            floors: row.integer("floors"),
            install_date: row
                .timestamp("install_date")
                .filter(|date| *date >= EPOCH_FLOOR),
            notes: row.text("notes"),
        })
    }
}

impl std::fmt::Display for Elevator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit {}", self.unit_number)?;
        if let Some(kind) = self.elevator_type {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}
