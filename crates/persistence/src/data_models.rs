// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::edit_log;

/// A stored audit row.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = edit_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EditLogRow {
    pub edit_id: i64,
    pub table_name: String,
    pub item_id: Option<i64>,
    pub column_name: String,
    pub time_stamp: String,
    pub old_value: String,
    pub new_value: String,
    pub user_name: String,
}

/// An audit row about to be written.
#[derive(Debug, Insertable)]
#[diesel(table_name = edit_log)]
pub struct NewEditLog<'a> {
    pub table_name: &'a str,
    pub item_id: Option<i64>,
    pub column_name: &'a str,
    pub time_stamp: String,
    pub old_value: &'a str,
    pub new_value: &'a str,
    pub user_name: &'a str,
}
