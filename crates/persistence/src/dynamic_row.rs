// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rows of unknown shape.
//!
//! Entity queries are built at runtime, so their result columns are not
//! known to Diesel. Every column is read back as text; SQLite converts
//! integers and reals on the way out.

use diesel::deserialize::{self, FromSql, QueryableByName};
use diesel::row::{Field, NamedRow, Row as DieselRow};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use liftbook::Row;

/// A result row as `(column, text)` pairs in select order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicRow {
    columns: Vec<(String, Option<String>)>,
}

impl QueryableByName<Sqlite> for DynamicRow {
    fn build<'a>(row: &impl NamedRow<'a, Sqlite>) -> deserialize::Result<Self> {
        let mut columns: Vec<(String, Option<String>)> = Vec::with_capacity(row.field_count());
        for index in 0..row.field_count() {
            let Some(field) = DieselRow::get(row, index) else {
                continue;
            };
            let name: String = field.field_name().unwrap_or_default().to_string();
            let value: Option<String> = match field.value() {
                Some(raw) => Some(<String as FromSql<Text, Sqlite>>::from_sql(raw)?),
                None => None,
            };
            columns.push((name, value));
        }
        Ok(Self { columns })
    }
}

impl From<DynamicRow> for Row {
    fn from(row: DynamicRow) -> Self {
        Self::new(row.columns)
    }
}
