// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection records and the query layer they commit through.
//!
//! Every entity wraps a [`TrackedRecord`]. Setters compare old and new
//! values and log real changes; [`Record::commit_to_database`] turns the
//! entity into typed [`ColumnValue`]s, issues an INSERT or UPDATE through a
//! [`QueryGateway`] depending on whether the record has an identity, and
//! then writes one audit row per pending edit.
//!
//! The gateway is a trait so the record layer never holds a database handle
//! of its own. The Diesel implementation lives in `liftbook-persistence`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod building;
mod column_value;
mod company;
mod contact;
mod elevator;
mod error;
mod gateway;
mod inspection;
mod record;
mod row;
mod statement;

#[cfg(test)]
mod tests;

pub use building::Building;
pub use column_value::{ColumnValue, EPOCH_FLOOR, NULL_LITERAL, SqlValue, format_timestamp};
pub use company::Company;
pub use contact::Contact;
pub use elevator::Elevator;
pub use error::{CoreError, DuplicateEntry, QueryError};
pub use gateway::{ConnectivityFault, GatewayError, QueryGateway, WriteOutcome};
pub use inspection::Inspection;
pub use record::{Record, TrackedRecord};
pub use row::Row;
pub use statement::{ChangeKind, Predicate, RELATION_TABLES, SelectQuery, Statement, WriteIntent};
