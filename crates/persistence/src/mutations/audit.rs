// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit row persistence.

use diesel::prelude::*;
use diesel::SqliteConnection;
use liftbook_audit::AuditEntry;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::NewEditLog;
use crate::diesel_schema::edit_log;
use crate::error::PersistenceError;

/// Writes one audit row and returns its `edit_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn persist_audit_entry(
    conn: &mut SqliteConnection,
    entry: &AuditEntry,
) -> Result<i64, PersistenceError> {
    let row: NewEditLog<'_> = NewEditLog {
        table_name: &entry.table_name,
        item_id: entry.item_id,
        column_name: &entry.column_name,
        time_stamp: entry.time_stamp_text(),
        old_value: &entry.old_value,
        new_value: &entry.new_value,
        user_name: &entry.user_name,
    };

    diesel::insert_into(edit_log::table)
        .values(&row)
        .execute(conn)?;
    let edit_id: i64 = conn.get_last_insert_rowid()?;

    debug!(
        edit_id,
        table = %entry.table_name,
        item_id = entry.item_id,
        column = %entry.column_name,
        "Persisted audit entry"
    );
    Ok(edit_id)
}
