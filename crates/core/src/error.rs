// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::building::Building;
use crate::company::Company;
use crate::gateway::GatewayError;
use liftbook_domain::DomainError;

/// Rejections raised while building a statement, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A column value was created without a column name.
    #[error("Column name must not be empty")]
    EmptyColumn,
    /// A table or column name is not a plain identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
    /// An INSERT or UPDATE was built with no values.
    #[error("Statement against '{0}' has no column values")]
    NoValues(String),
    /// An UPDATE or DELETE was built without a WHERE clause.
    #[error("Statement against '{0}' has no predicate")]
    MissingPredicate(String),
    /// DELETE is only permitted on relation tables.
    #[error("DELETE is not permitted on table '{0}'")]
    DeleteNotPermitted(String),
}

/// An existing row that blocked the insert of a new record.
#[derive(Debug, Clone, PartialEq)]
pub enum DuplicateEntry {
    Company(Company),
    Building(Building),
}

impl DuplicateEntry {
    /// Identity of the existing row.
    #[must_use]
    pub fn existing_id(&self) -> Option<i64> {
        use crate::record::Record;
        match self {
            Self::Company(company) => company.id(),
            Self::Building(building) => building.id(),
        }
    }
}

impl std::fmt::Display for DuplicateEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Company(company) => write!(f, "company '{}'", company.name()),
            Self::Building(building) => write!(
                f,
                "building '{}' of company {}",
                building.name(),
                building.company_id()
            ),
        }
    }
}

/// Errors raised by record operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A value failed domain validation.
    Domain(DomainError),
    /// A statement was rejected before execution.
    Query(QueryError),
    /// The gateway failed to execute a statement.
    Gateway(GatewayError),
    /// The record already has an identity and cannot be given another.
    IdentityAlreadyAssigned { record: &'static str, existing: i64 },
    /// The operation needs a persisted record.
    NotPersisted(&'static str),
    /// A record with the same natural key already exists.
    DuplicateEntry(Box<DuplicateEntry>),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "Domain violation: {err}"),
            Self::Query(err) => write!(f, "Invalid statement: {err}"),
            Self::Gateway(err) => write!(f, "Database error: {err}"),
            Self::IdentityAlreadyAssigned { record, existing } => {
                write!(f, "{record} already has identity {existing}")
            }
            Self::NotPersisted(record) => {
                write!(f, "{record} must be committed before it can be linked")
            }
            Self::DuplicateEntry(existing) => write!(f, "Duplicate entry: {existing} already exists"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Query(err) => Some(err),
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<QueryError> for CoreError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

impl From<GatewayError> for CoreError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}
