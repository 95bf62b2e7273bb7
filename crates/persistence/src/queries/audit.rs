// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit history queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use liftbook_audit::AuditEntry;
use time::PrimitiveDateTime;
use time::macros::format_description;

use crate::data_models::EditLogRow;
use crate::diesel_schema::edit_log;
use crate::error::PersistenceError;

/// Audit rows for one record, oldest first.
///
/// Rows with the same time stamp keep insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored time stamp is malformed.
pub fn edit_history(
    conn: &mut SqliteConnection,
    table_name: &str,
    item_id: i64,
) -> Result<Vec<AuditEntry>, PersistenceError> {
    let rows: Vec<EditLogRow> = edit_log::table
        .filter(edit_log::table_name.eq(table_name))
        .filter(edit_log::item_id.eq(item_id))
        .order((edit_log::time_stamp.asc(), edit_log::edit_id.asc()))
        .select(EditLogRow::as_select())
        .load(conn)?;

    rows.into_iter().map(entry_from_row).collect()
}

/// Number of stored audit rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_edit_log(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(edit_log::table.count().get_result(conn)?)
}

fn entry_from_row(row: EditLogRow) -> Result<AuditEntry, PersistenceError> {
    let time_stamp: PrimitiveDateTime = PrimitiveDateTime::parse(
        &row.time_stamp,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map_err(|e| {
        PersistenceError::SerializationError(format!(
            "edit {} has invalid time stamp '{}': {e}",
            row.edit_id, row.time_stamp
        ))
    })?;

    Ok(AuditEntry {
        table_name: row.table_name,
        item_id: row.item_id,
        column_name: row.column_name,
        time_stamp,
        old_value: row.old_value,
        new_value: row.new_value,
        user_name: row.user_name,
    })
}
