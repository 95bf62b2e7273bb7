// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::column_value::{ColumnValue, EPOCH_FLOOR};
use crate::error::CoreError;
use crate::gateway::QueryGateway;
use crate::record::{Record, TrackedRecord};
use crate::row::Row;
use crate::statement::Predicate;
use liftbook_domain::Money;
use time::PrimitiveDateTime;

/// A dated inspection of one elevator and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    tracked: TrackedRecord,
    elevator_id: i64,
    inspection_date: Option<PrimitiveDateTime>,
    inspector: String,
    passed: bool,
    fee: Money,
    certificate_number: String,
    notes: String,
}

impl Inspection {
    #[must_use]
    pub fn new(elevator_id: i64, inspection_date: PrimitiveDateTime) -> Self {
        Self {
            tracked: TrackedRecord::new(Self::NAME),
            elevator_id,
            inspection_date: Some(inspection_date).filter(|date| *date >= EPOCH_FLOOR),
            inspector: String::new(),
            passed: false,
            fee: Money::zero(),
            certificate_number: String::new(),
            notes: String::new(),
        }
    }

    #[must_use]
    pub const fn elevator_id(&self) -> i64 {
        self.elevator_id
    }

    #[must_use]
    pub const fn inspection_date(&self) -> Option<PrimitiveDateTime> {
        self.inspection_date
    }

    #[must_use]
    pub fn inspector(&self) -> &str {
        &self.inspector
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub const fn fee(&self) -> Money {
        self.fee
    }

    #[must_use]
    pub fn certificate_number(&self) -> &str {
        &self.certificate_number
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_inspection_date(&mut self, date: PrimitiveDateTime) -> bool {
        self.tracked
            .set_timestamp("inspection_date", &mut self.inspection_date, date)
    }

    pub fn set_inspector(&mut self, inspector: &str) -> bool {
        self.tracked
            .set_text("inspector", &mut self.inspector, inspector)
    }

    pub fn set_passed(&mut self, passed: bool) -> bool {
        self.tracked.set_value("passed", &mut self.passed, passed)
    }

    /// Zero is ignored.
    pub fn set_fee(&mut self, fee: Money) -> bool {
        self.tracked.set_money("fee", &mut self.fee, fee)
    }

    pub fn set_certificate_number(&mut self, certificate_number: &str) -> bool {
        self.tracked.set_text(
            "certificate_number",
            &mut self.certificate_number,
            certificate_number,
        )
    }

    pub fn set_notes(&mut self, notes: &str) -> bool {
        self.tracked.set_text("notes", &mut self.notes, notes)
    }

    /// Inspections of an elevator, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn for_elevator<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        elevator_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        let predicate: Predicate =
            Predicate::eq(ColumnValue::integer("elevator_id", Some(elevator_id))?);
        let mut inspections: Vec<Self> = Self::load_where(gateway, Some(&predicate))?;
        inspections.sort_by_key(|inspection| inspection.inspection_date);
        Ok(inspections)
    }
}

impl Record for Inspection {
    const NAME: &'static str = "Inspection";
    const TABLE: &'static str = "inspection";
    const ID_COLUMN: &'static str = "inspection_id";

    fn tracked(&self) -> &TrackedRecord {
        &self.tracked
    }

    fn tracked_mut(&mut self) -> &mut TrackedRecord {
        &mut self.tracked
    }

    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError> {
        Ok(vec![
            ColumnValue::integer("elevator_id", Some(self.elevator_id))?,
            ColumnValue::timestamp("inspection_date", self.inspection_date)?,
            ColumnValue::text("inspector", Some(&self.inspector))?,
            ColumnValue::boolean("passed", self.passed)?,
            ColumnValue::money("fee", self.fee)?,
            ColumnValue::text("certificate_number", Some(&self.certificate_number))?,
            ColumnValue::text("notes", Some(&self.notes))?,
        ])
    }

    fn from_row(row: &Row) -> Result<Self, CoreError> {
        Ok(Self {
            tracked: TrackedRecord::hydrated(Self::NAME, row.optional_integer(Self::ID_COLUMN)),
            elevator_id: row.integer("elevator_id"),
            inspection_date: row
                .timestamp("inspection_date")
                .filter(|date| *date >= EPOCH_FLOOR),
            inspector: row.text("inspector"),
            passed: row.boolean("passed"),
            fee: row.money("fee"),
            certificate_number: row.text("certificate_number"),
            notes: row.text("notes"),
        })
    }
}
