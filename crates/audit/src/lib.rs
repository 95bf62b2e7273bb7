// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level edit tracking.
//!
//! An [`EditLog`] holds the pending changes of one record between load and
//! commit. It keeps at most one [`EditRecord`] per `(table, column)`: a second
//! change to the same column replaces the new value and keeps the first old
//! value, so the trail reads "value before this session -> final value".
//!
//! On commit each pending edit becomes an [`AuditEntry`], stamped with the
//! time and the user who made it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::PrimitiveDateTime;
use time::macros::format_description;

/// One logged field-level change awaiting commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// The record type that made the change (e.g. "Building").
    pub table_name: String,
    /// The record identity when the change was made, if it had one.
    pub row_id: Option<i64>,
    /// The column that changed.
    pub column_name: String,
    /// The value before the first change in this session.
    pub old_value: String,
    /// The latest value.
    pub new_value: String,
}

impl EditRecord {
    #[must_use]
    pub fn new(
        table_name: &str,
        row_id: Option<i64>,
        column_name: &str,
        old_value: &str,
        new_value: &str,
    ) -> Self {
        Self {
            table_name: table_name.to_string(),
            row_id,
            column_name: column_name.to_string(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
        }
    }
}

/// Pending edits for one record, in first-change order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLog {
    entries: Vec<EditRecord>,
    index: HashMap<(String, String), usize>,
}

impl EditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change, merging with any pending edit for the same column.
    ///
    /// If `(table_name, column_name)` already has a pending edit only its new
    /// value is replaced; the original old value and row id are kept.
    pub fn record(
        &mut self,
        table_name: &str,
        row_id: Option<i64>,
        column_name: &str,
        old_value: &str,
        new_value: &str,
    ) {
        let key: (String, String) = (table_name.to_string(), column_name.to_string());
        if let Some(&position) = self.index.get(&key) {
            if let Some(existing) = self.entries.get_mut(position) {
                existing.new_value = new_value.to_string();
                return;
            }
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(EditRecord::new(
            table_name,
            row_id,
            column_name,
            old_value,
            new_value,
        ));
    }

    /// Returns the pending edit for a column, if any.
    #[must_use]
    pub fn get(&self, table_name: &str, column_name: &str) -> Option<&EditRecord> {
        self.index
            .get(&(table_name.to_string(), column_name.to_string()))
            .and_then(|&position| self.entries.get(position))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditRecord> {
        self.entries.iter()
    }

    /// Fills in the row id of edits recorded before the record had one.
    pub fn assign_row_id(&mut self, row_id: i64) {
        for entry in self.entries.iter_mut().filter(|e| e.row_id.is_none()) {
            entry.row_id = Some(row_id);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Renders pending edits as `Column: old -> new`, one per line.
    ///
    /// Returns `None` when nothing is pending.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}: {} -> {}", e.column_name, e.old_value, e.new_value))
            .collect();
        Some(lines.join("\n"))
    }
}

/// A persisted audit row: one committed edit with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub table_name: String,
    pub item_id: Option<i64>,
    pub column_name: String,
    pub time_stamp: PrimitiveDateTime,
    pub old_value: String,
    pub new_value: String,
    pub user_name: String,
}

impl AuditEntry {
    /// Stamps a pending edit with a time and user.
    #[must_use]
    pub fn from_edit(edit: &EditRecord, time_stamp: PrimitiveDateTime, user_name: &str) -> Self {
        Self {
            table_name: edit.table_name.clone(),
            item_id: edit.row_id,
            column_name: edit.column_name.clone(),
            time_stamp,
            old_value: edit.old_value.clone(),
            new_value: edit.new_value.clone(),
            user_name: user_name.to_string(),
        }
    }

    /// The time stamp as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn time_stamp_text(&self) -> String {
        self.time_stamp
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let item: String = self
            .item_id
            .map_or_else(|| String::from("-"), |id| id.to_string());
        write!(
            f,
            "{} {} {}#{} {}: {} -> {}",
            self.time_stamp_text(),
            self.user_name,
            self.table_name,
            item,
            self.column_name,
            self.old_value,
            self.new_value
        )
    }
}
