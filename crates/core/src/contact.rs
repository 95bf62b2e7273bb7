// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! People at customer companies and buildings.
//!
//! Contacts are linked many-to-many through the `contact_company` and
//! `contact_building` relation tables. Links are not change-tracked: they
//! are written immediately and are the only rows ever deleted.

use crate::column_value::{ColumnValue, SqlValue};
use crate::error::CoreError;
use crate::gateway::QueryGateway;
use crate::record::{Record, TrackedRecord};
use crate::row::Row;
use crate::statement::{Predicate, SelectQuery};
use liftbook_domain::{DomainError, EmailAddress, TelephoneNumber};
use tracing::debug;

const CONTACT_COMPANY: &str = "contact_company";
const CONTACT_BUILDING: &str = "contact_building";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    tracked: TrackedRecord,
    first_name: String,
    last_name: String,
    title: String,
    phone: Option<TelephoneNumber>,
    email: Option<EmailAddress>,
    notes: String,
}

impl Contact {
    #[must_use]
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            tracked: TrackedRecord::new(Self::NAME),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            title: String::new(),
            phone: None,
            email: None,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `First Last`, skipping a blank part.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
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

    pub fn set_first_name(&mut self, first_name: &str) -> bool {
        self.tracked
            .set_text("first_name", &mut self.first_name, first_name)
    }

    pub fn set_last_name(&mut self, last_name: &str) -> bool {
        self.tracked
            .set_text("last_name", &mut self.last_name, last_name)
    }

    pub fn set_title(&mut self, title: &str) -> bool {
        self.tracked.set_text("title", &mut self.title, title)
    }

    /// # Errors
    ///
    /// Returns an error if the input has digits but is not a valid number.
    pub fn set_phone(&mut self, phone: &str) -> Result<bool, DomainError> {
        Ok(match TelephoneNumber::parse_optional(phone)? {
            Some(phone) => self.tracked.set_optional("phone", &mut self.phone, phone),
            None => false,
        })
    }

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

    fn persisted_id(&self) -> Result<i64, CoreError> {
        self.id().ok_or(CoreError::NotPersisted(Self::NAME))
    }

    fn link_predicate(contact_id: i64, column: &str, other_id: i64) -> Result<Predicate, CoreError> {
        Ok(
            Predicate::eq(ColumnValue::integer(Self::ID_COLUMN, Some(contact_id))?)
                .and(ColumnValue::integer(column, Some(other_id))?),
        )
    }

    fn link<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        table: &str,
        column: &str,
        other_id: i64,
    ) -> Result<bool, CoreError> {
        let contact_id: i64 = self.persisted_id()?;
        let predicate: Predicate = Self::link_predicate(contact_id, column, other_id)?;
        if !gateway
            .select_columns(Self::ID_COLUMN, table, Some(&predicate))?
            .is_empty()
        {
            return Ok(false);
        }
        gateway.insert(
            table,
            vec![
                ColumnValue::integer(Self::ID_COLUMN, Some(contact_id))?,
                ColumnValue::integer(column, Some(other_id))?,
            ],
        )?;
        debug!(contact_id, table, other_id, "Linked contact");
        Ok(true)
    }

    fn unlink<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        table: &str,
        column: &str,
        other_id: i64,
    ) -> Result<bool, CoreError> {
        let contact_id: i64 = self.persisted_id()?;
        let predicate: Predicate = Self::link_predicate(contact_id, column, other_id)?;
        let removed: usize = gateway.delete(table, predicate)?;
        debug!(contact_id, table, other_id, removed, "Unlinked contact");
        Ok(removed > 0)
    }

    fn linked_ids<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        table: &str,
        column: &str,
    ) -> Result<Vec<i64>, CoreError> {
        let Some(contact_id) = self.id() else {
            return Ok(Vec::new());
        };
        let query: SelectQuery = SelectQuery::columns(
            column,
            table,
            Some(&Predicate::eq(ColumnValue::integer(
                Self::ID_COLUMN,
                Some(contact_id),
            )?)),
        )?
        .order_by(column)?;
        Ok(gateway
            .select(&query)?
            .iter()
            .filter_map(|row| row.optional_integer(column))
            .collect())
    }

    /// Links this contact to a company. Returns `false` if already linked.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotPersisted` for an unsaved contact, or the
    /// gateway error if the write fails.
    pub fn link_company<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        company_id: i64,
    ) -> Result<bool, CoreError> {
        self.link(gateway, CONTACT_COMPANY, "company_id", company_id)
    }

    /// Removes a company link. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotPersisted` for an unsaved contact, or the
    /// gateway error if the delete fails.
    pub fn unlink_company<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        company_id: i64,
    ) -> Result<bool, CoreError> {
        self.unlink(gateway, CONTACT_COMPANY, "company_id", company_id)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotPersisted` for an unsaved contact, or the
    /// gateway error if the write fails.
    pub fn link_building<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        building_id: i64,
    ) -> Result<bool, CoreError> {
        self.link(gateway, CONTACT_BUILDING, "building_id", building_id)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotPersisted` for an unsaved contact, or the
    /// gateway error if the delete fails.
    pub fn unlink_building<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
        building_id: i64,
    ) -> Result<bool, CoreError> {
        self.unlink(gateway, CONTACT_BUILDING, "building_id", building_id)
    }

    /// Companies this contact is linked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn company_ids<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
    ) -> Result<Vec<i64>, CoreError> {
        self.linked_ids(gateway, CONTACT_COMPANY, "company_id")
    }

    /// Buildings this contact is linked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn building_ids<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
    ) -> Result<Vec<i64>, CoreError> {
        self.linked_ids(gateway, CONTACT_BUILDING, "building_id")
    }

    /// Contacts linked to a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn for_company<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        company_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        Self::linked_to(gateway, CONTACT_COMPANY, "company_id", company_id)
    }

    /// Contacts linked to a building.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn for_building<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        building_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        Self::linked_to(gateway, CONTACT_BUILDING, "building_id", building_id)
    }

    fn linked_to<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        table: &str,
        column: &str,
        other_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        let query: SelectQuery = SelectQuery::raw(format!(
            "SELECT c.* FROM {contact} c JOIN {table} r ON r.{id} = c.{id} \
             WHERE r.{column} = ? ORDER BY c.last_name, c.first_name",
            contact = Self::TABLE,
            id = Self::ID_COLUMN,
        ))
        .bind(SqlValue::Integer(other_id));
        gateway.select(&query)?.iter().map(Self::from_row).collect()
    }
}

impl Record for Contact {
    const NAME: &'static str = "Contact";
    const TABLE: &'static str = "contact";
    const ID_COLUMN: &'static str = "contact_id";

    fn tracked(&self) -> &TrackedRecord {
        &self.tracked
    }

    fn tracked_mut(&mut self) -> &mut TrackedRecord {
        &mut self.tracked
    }

    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError> {
        let phone: Option<String> = self.phone.map(|p| p.to_string());
        Ok(vec![
            ColumnValue::text("first_name", Some(&self.first_name))?,
            ColumnValue::text("last_name", Some(&self.last_name))?,
            ColumnValue::text("title", Some(&self.title))?,
            ColumnValue::text("phone", phone.as_deref())?,
            ColumnValue::text("email", self.email.as_ref().map(EmailAddress::as_str))?,
            ColumnValue::text("notes", Some(&self.notes))?,
        ])
    }

    fn from_row(row: &Row) -> Result<Self, CoreError> {
        Ok(Self {
            tracked: TrackedRecord::hydrated(Self::NAME, row.optional_integer(Self::ID_COLUMN)),
            first_name: row.text("first_name"),
            last_name: row.text("last_name"),
            title: row.text("title"),
            phone: row
                .optional_text("phone")
                .and_then(|raw| TelephoneNumber::parse_optional(&raw).ok().flatten()),
            email: row
                .optional_text("email")
                .and_then(|raw| EmailAddress::new(&raw).ok()),
            notes: row.text("notes"),
        })
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())?;
        if !self.title.is_empty() {
            write!(f, ", {}", self.title)?;
        }
        Ok(())
    }
}
