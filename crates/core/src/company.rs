// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::building::Building;
use crate::column_value::{ColumnValue, SqlValue};
use crate::error::{CoreError, DuplicateEntry};
use crate::gateway::QueryGateway;
use crate::record::{Record, TrackedRecord};
use crate::row::Row;
use crate::statement::SelectQuery;
use liftbook_domain::{Address, DomainError, EmailAddress, TelephoneNumber};
use tracing::warn;

/// A customer company that owns buildings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    tracked: TrackedRecord,
    name: String,
    address: Option<Address>,
    phone: Option<TelephoneNumber>,
    email: Option<EmailAddress>,
    notes: String,
    active: bool,
}

impl Company {
    /// A new, active company with no identity.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            tracked: TrackedRecord::new(Self::NAME),
            name: name.trim().to_string(),
            address: None,
            phone: None,
            email: None,
            notes: String::new(),
            active: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    #[must_use]
    pub const fn phone(&self) -> Option<&TelephoneNumber> {
        self.phone.as_ref()
    }

    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        self.tracked.set_text("name", &mut self.name, name)
    }

    pub fn set_address(&mut self, address: Address) -> bool {
        self.tracked.set_address(&mut self.address, address)
    }

    /// Parses and sets the phone number. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has digits but is not a valid number.
    pub fn set_phone(&mut self, phone: &str) -> Result<bool, DomainError> {
        Ok(match TelephoneNumber::parse_optional(phone)? {
            Some(phone) => self.tracked.set_optional("phone", &mut self.phone, phone),
            None => false,
        })
    }

    /// Validates and sets the e-mail address. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is malformed.
    pub fn set_email(&mut self, email: &str) -> Result<bool, DomainError> {
        if email.trim().is_empty() {
            return Ok(false);
        }
        let email: EmailAddress = EmailAddress::new(email)?;
        Ok(self.tracked.set_optional("email", &mut self.email, email))
    }

    pub fn set_notes(&mut self, notes: &str) -> bool {
        self.tracked.set_text("notes", &mut self.notes, notes)
    }

    pub fn set_active(&mut self, active: bool) -> bool {
        self.tracked.set_value("active", &mut self.active, active)
    }

    /// Buildings owned by this company. Empty for an unsaved company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn buildings<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
    ) -> Result<Vec<Building>, CoreError> {
        match self.id() {
            Some(id) => Building::for_company(gateway, id),
            None => Ok(Vec::new()),
        }
    }

    /// Finds a company by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be hydrated.
    pub fn find_by_name<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        name: &str,
    ) -> Result<Option<Self>, CoreError> {
        let query: SelectQuery = SelectQuery::raw(format!(
            "SELECT * FROM {} WHERE lower(name) = lower(?) ORDER BY {}",
            Self::TABLE,
            Self::ID_COLUMN
        ))
        .bind(SqlValue::Text(name.trim().to_string()));
        gateway
            .select(&query)?
            .first()
            .map(Self::from_row)
            .transpose()
    }
}

impl Record for Company {
    const NAME: &'static str = "Company";
    const TABLE: &'static str = "company";
    const ID_COLUMN: &'static str = "company_id";

    fn tracked(&self) -> &TrackedRecord {
        &self.tracked
    }

    fn tracked_mut(&mut self) -> &mut TrackedRecord {
        &mut self.tracked
    }

    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError> {
        let address: Option<&Address> = self.address.as_ref();
        let state: Option<String> = address.map(|a| a.state().to_string());
        let phone: Option<String> = self.phone.map(|p| p.to_string());
        Ok(vec![
            ColumnValue::text("name", Some(&self.name))?,
            ColumnValue::text("street", address.map(Address::street))?,
            ColumnValue::text("city", address.map(Address::city))?,
            ColumnValue::text("state", state.as_deref())?,
            ColumnValue::text("zip", address.map(Address::zip))?,
            ColumnValue::text("phone", phone.as_deref())?,
            ColumnValue::text("email", self.email.as_ref().map(EmailAddress::as_str))?,
            ColumnValue::text("notes", Some(&self.notes))?,
            ColumnValue::boolean("active", self.active)?,
        ])
    }

    fn from_row(row: &Row) -> Result<Self, CoreError> {
        let id: Option<i64> = row.optional_integer(Self::ID_COLUMN);
        Ok(Self {
            tracked: TrackedRecord::hydrated(Self::NAME, id),
            name: row.text("name"),
            address: address_from_row(Self::NAME, id, row),
            phone: row
                .optional_text("phone")
                .and_then(|raw| TelephoneNumber::parse_optional(&raw).ok().flatten()),
            email: row
                .optional_text("email")
                .and_then(|raw| EmailAddress::new(&raw).ok()),
            notes: row.text("notes"),
            active: row.boolean("active"),
        })
    }

    fn check_duplicate<G: QueryGateway + ?Sized>(&self, gateway: &mut G) -> Result<(), CoreError> {
        match Self::find_by_name(gateway, &self.name)? {
            Some(existing) => Err(CoreError::DuplicateEntry(Box::new(DuplicateEntry::Company(
                existing,
            )))),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reads the four address columns. A partial or invalid stored address is
/// logged and treated as unset.
pub(crate) fn address_from_row(record: &str, id: Option<i64>, row: &Row) -> Option<Address> {
    let street: String = row.optional_text("street")?;
    match Address::new(
        &street,
        &row.text("city"),
        &row.text("state"),
        &row.text("zip"),
    ) {
        Ok(address) => Some(address),
        Err(err) => {
            warn!(record, id, error = %err, "Ignoring stored address");
            None
        }
    }
}
