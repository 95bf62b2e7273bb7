// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change-tracked records.
//!
//! [`TrackedRecord`] is the shared state every entity embeds: its kind
//! name, its database identity once it has one, and the pending
//! [`EditLog`]. The `set_*` helpers implement the write rules common to all
//! entities. A write equal to the current value is ignored. So is a write
//! of a "not set" value (blank text, zero, a pre-2000 date). Anything else
//! updates the field and logs one edit.
//!
//! [`Record`] is the per-entity contract. Its provided
//! [`Record::commit_to_database`] is the only way an entity reaches the
//! database.

use crate::column_value::{ColumnValue, EPOCH_FLOOR, format_timestamp};
use crate::error::CoreError;
use crate::gateway::{QueryGateway, WriteOutcome};
use crate::row::Row;
use crate::statement::{Predicate, SelectQuery, Statement};
use liftbook_audit::{AuditEntry, EditLog};
use liftbook_domain::{Address, Money};
use std::fmt::Display;
use time::PrimitiveDateTime;
use tracing::{debug, info, warn};

/// Identity and pending edits of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRecord {
    name: &'static str,
    id: Option<i64>,
    edits: EditLog,
}

impl TrackedRecord {
    /// A record that has never been saved.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            id: None,
            edits: EditLog::new(),
        }
    }

    /// A record populated from a stored row. Starts with no edits.
    #[must_use]
    pub fn hydrated(name: &'static str, id: Option<i64>) -> Self {
        Self {
            name,
            id,
            edits: EditLog::new(),
        }
    }

    /// The entity kind, used as the audit table name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Sets the identity. Only allowed once.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IdentityAlreadyAssigned` if an identity is set.
    pub fn assign_id(&mut self, id: i64) -> Result<(), CoreError> {
        if let Some(existing) = self.id {
            return Err(CoreError::IdentityAlreadyAssigned {
                record: self.name,
                existing,
            });
        }
        self.id = Some(id);
        self.edits.assign_row_id(id);
        Ok(())
    }

    #[must_use]
    pub const fn is_edited(&self) -> bool {
        !self.edits.is_empty()
    }

    #[must_use]
    pub const fn edits(&self) -> &EditLog {
        &self.edits
    }

    /// Logs a change without touching any field.
    pub fn log_edit(&mut self, column: &str, old_value: &str, new_value: &str) {
        self.edits
            .record(self.name, self.id, column, old_value, new_value);
    }

    /// Text field. Blank input is ignored; stored text is trimmed.
    pub fn set_text(&mut self, column: &str, field: &mut String, value: &str) -> bool {
        let value: &str = value.trim();
        if value.is_empty() || field.as_str() == value {
            return false;
        }
        self.log_edit(column, field, value);
        *field = value.to_string();
        true
    }

    /// Integer field. Zero is ignored; a zero old value logs as blank.
    pub fn set_integer(&mut self, column: &str, field: &mut i64, value: i64) -> bool {
        if value == 0 || *field == value {
            return false;
        }
        let old: String = if *field == 0 {
            String::new()
        } else {
            field.to_string()
        };
        self.log_edit(column, &old, &value.to_string());
        *field = value;
        true
    }

    /// Date field. Dates before 2000-01-01 are ignored.
    pub fn set_timestamp(
        &mut self,
        column: &str,
        field: &mut Option<PrimitiveDateTime>,
        value: PrimitiveDateTime,
    ) -> bool {
        if value < EPOCH_FLOOR || *field == Some(value) {
            return false;
        }
        let old: String = field
            .filter(|stamp| *stamp >= EPOCH_FLOOR)
            .map(format_timestamp)
            .unwrap_or_default();
        self.log_edit(column, &old, &format_timestamp(value));
        *field = Some(value);
        true
    }

    /// Field with no blank state of its own. Callers filter blanks first.
    pub fn set_value<T: PartialEq + Display>(
        &mut self,
        column: &str,
        field: &mut T,
        value: T,
    ) -> bool {
        if *field == value {
            return false;
        }
        self.log_edit(column, &field.to_string(), &value.to_string());
        *field = value;
        true
    }

    /// Money field. Zero is ignored and a zero old value logs as blank.
    pub fn set_money(&mut self, column: &str, field: &mut Money, value: Money) -> bool {
        if value.is_zero() || *field == value {
            return false;
        }
        let old: String = if field.is_zero() {
            String::new()
        } else {
            field.to_string()
        };
        self.log_edit(column, &old, &value.to_string());
        *field = value;
        true
    }

    /// Optional field. An unset old value logs as blank.
    pub fn set_optional<T: PartialEq + Display>(
        &mut self,
        column: &str,
        field: &mut Option<T>,
        value: T,
    ) -> bool {
        if field.as_ref() == Some(&value) {
            return false;
        }
        let old: String = field.as_ref().map(ToString::to_string).unwrap_or_default();
        self.log_edit(column, &old, &value.to_string());
        *field = Some(value);
        true
    }

    /// Address, logged as one edit per changed part.
    pub fn set_address(&mut self, field: &mut Option<Address>, value: Address) -> bool {
        if field.as_ref() == Some(&value) {
            return false;
        }
        let parts = |address: Option<&Address>| -> [String; 4] {
            address.map_or_else(Default::default, |a| {
                [
                    a.street().to_string(),
                    a.city().to_string(),
                    a.state().to_string(),
                    a.zip().to_string(),
                ]
            })
        };
        let old: [String; 4] = parts(field.as_ref());
        let new: [String; 4] = parts(Some(&value));
        for ((column, old), new) in ["street", "city", "state", "zip"]
            .into_iter()
            .zip(&old)
            .zip(&new)
        {
            if old != new {
                self.log_edit(column, old, new);
            }
        }
        *field = Some(value);
        true
    }

    /// Pending edits as `column: old -> new` lines, or `None`.
    #[must_use]
    pub fn save_confirmation_text(&self) -> Option<String> {
        self.edits.summary()
    }

    /// Shows the pending edits to `confirm` and returns its answer.
    ///
    /// Returns `false` without asking when nothing is pending.
    pub fn confirm_save<F: FnOnce(&str) -> bool>(&self, confirm: F) -> bool {
        self.save_confirmation_text()
            .is_some_and(|summary| confirm(&summary))
    }

    /// Writes the row, then one audit row per pending edit.
    ///
    /// A record without an identity is inserted and takes the generated id;
    /// otherwise the row is updated by `id_column`. Returns `Ok(true)` only
    /// when the row write and every audit write succeeded. Pending edits are
    /// cleared only in that case. Audit failures are logged, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the row write itself fails.
    pub fn commit<G: QueryGateway + ?Sized>(
        &mut self,
        gateway: &mut G,
        table: &str,
        id_column: &str,
        values: Vec<ColumnValue>,
    ) -> Result<bool, CoreError> {
        let row_written: bool = if let Some(id) = self.id {
            let statement: Statement = Statement::update_row(table, values, id_column, id)?;
            let outcome: WriteOutcome = gateway.execute(&statement)?;
            debug!(
                record = self.name,
                id,
                rows = outcome.rows_affected,
                "Updated record"
            );
            outcome.rows_affected > 0
        } else {
            let id: i64 = gateway.insert(table, values)?;
            self.assign_id(id)?;
            info!(record = self.name, id, "Inserted record");
            true
        };

        if !row_written {
            warn!(
                record = self.name,
                id = self.id,
                "Row write matched nothing; keeping pending edits"
            );
            return Ok(false);
        }

        let time_stamp: PrimitiveDateTime = gateway.now();
        let user_name: String = gateway.user_name().to_string();
        let mut all_recorded: bool = true;
        for edit in self.edits.iter() {
            let entry: AuditEntry = AuditEntry::from_edit(edit, time_stamp, &user_name);
            if let Err(err) = gateway.record_audit(&entry) {
                warn!(
                    record = self.name,
                    column = %edit.column_name,
                    error = %err,
                    "Failed to record audit entry"
                );
                all_recorded = false;
            }
        }

        if all_recorded {
            self.edits.clear();
        }
        Ok(all_recorded)
    }
}

/// A persisted entity.
pub trait Record: Sized {
    /// Entity kind, used in audit rows.
    const NAME: &'static str;
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;

    fn tracked(&self) -> &TrackedRecord;

    fn tracked_mut(&mut self) -> &mut TrackedRecord;

    /// Every stored column except the identity.
    ///
    /// # Errors
    ///
    /// Returns an error if a column value cannot be built.
    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError>;

    /// Populates an entity from a stored row without logging edits.
    ///
    /// # Errors
    ///
    /// Returns an error if a closed-vocabulary column holds an unknown value.
    fn from_row(row: &Row) -> Result<Self, CoreError>;

    /// Rejects an insert that would duplicate an existing row.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateEntry` carrying the existing row.
    fn check_duplicate<G: QueryGateway + ?Sized>(&self, _gateway: &mut G) -> Result<(), CoreError> {
        Ok(())
    }

    fn id(&self) -> Option<i64> {
        self.tracked().id()
    }

    fn is_edited(&self) -> bool {
        self.tracked().is_edited()
    }

    fn save_confirmation_text(&self) -> Option<String> {
        self.tracked().save_confirmation_text()
    }

    /// Inserts or updates this entity and records its audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if a duplicate exists or the row write fails.
    fn commit_to_database<G: QueryGateway + ?Sized>(
        &mut self,
        gateway: &mut G,
    ) -> Result<bool, CoreError> {
        if self.id().is_none() {
            self.check_duplicate(gateway)?;
        }
        let values: Vec<ColumnValue> = self.column_values()?;
        self.tracked_mut()
            .commit(gateway, Self::TABLE, Self::ID_COLUMN, values)
    }

    /// Loads one entity by identity.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::RowCount` if no row has that identity.
    fn load<G: QueryGateway + ?Sized>(gateway: &mut G, id: i64) -> Result<Self, CoreError> {
        let predicate: Predicate = Predicate::eq(ColumnValue::integer(Self::ID_COLUMN, Some(id))?);
        let query: SelectQuery = SelectQuery::columns("*", Self::TABLE, Some(&predicate))?;
        let row: Row = gateway.select_single(&query)?;
        Self::from_row(&row)
    }

    /// Loads every entity matching `predicate`, in identity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    fn load_where<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<Self>, CoreError> {
        let query: SelectQuery =
            SelectQuery::columns("*", Self::TABLE, predicate)?.order_by(Self::ID_COLUMN)?;
        gateway.select(&query)?.iter().map(Self::from_row).collect()
    }

    /// Loads every entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    fn load_all<G: QueryGateway + ?Sized>(gateway: &mut G) -> Result<Vec<Self>, CoreError> {
        Self::load_where(gateway, None)
    }
}
