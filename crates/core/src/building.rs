// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::column_value::{ColumnValue, SqlValue};
use crate::company::address_from_row;
use crate::elevator::Elevator;
use crate::error::{CoreError, DuplicateEntry};
use crate::gateway::QueryGateway;
use crate::record::{Record, TrackedRecord};
use crate::row::Row;
use crate::statement::{Predicate, SelectQuery};
use liftbook_domain::{Address, County, DomainError, GeographicCoordinates, Money, Month};
use tracing::warn;

/// A building under an inspection contract.
///
/// `firm_fee` is the contracted annual fee and `contract_month` the month
/// the contract renews. Zero and [`Month::None`] mean "not set".
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    tracked: TrackedRecord,
    company_id: i64,
    name: String,
    address: Option<Address>,
    county: Option<County>,
    coordinates: GeographicCoordinates,
    firm_fee: Money,
    contract_month: Month,
    active: bool,
    notes: String,
}

impl Building {
    #[must_use]
    pub fn new(company_id: i64, name: &str) -> Self {
        Self {
            tracked: TrackedRecord::new(Self::NAME),
            company_id,
            name: name.trim().to_string(),
            address: None,
            county: None,
            coordinates: GeographicCoordinates::unset(),
            firm_fee: Money::zero(),
            contract_month: Month::None,
            active: true,
            notes: String::new(),
        }
    }

    #[must_use]
    pub const fn company_id(&self) -> i64 {
        self.company_id
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
    pub const fn county(&self) -> Option<County> {
        self.county
    }

    #[must_use]
    pub const fn coordinates(&self) -> GeographicCoordinates {
        self.coordinates
    }

    #[must_use]
    pub const fn firm_fee(&self) -> Money {
        self.firm_fee
    }

    #[must_use]
    pub const fn contract_month(&self) -> Month {
        self.contract_month
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Moves the building to another company.
    pub fn set_company_id(&mut self, company_id: i64) -> bool {
        self.tracked
            .set_integer("company_id", &mut self.company_id, company_id)
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        self.tracked.set_text("name", &mut self.name, name)
    }

    pub fn set_address(&mut self, address: Address) -> bool {
        self.tracked.set_address(&mut self.address, address)
    }

    pub fn set_county(&mut self, county: County) -> bool {
        self.tracked.set_optional("county", &mut self.county, county)
    }

    /// Sets the county from its display name. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCounty` for a name not in the vocabulary.
    pub fn set_county_name(&mut self, county: &str) -> Result<bool, DomainError> {
        if county.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.set_county(county.parse()?))
    }

    /// Sets the location. Unset coordinates are ignored.
    pub fn set_coordinates(&mut self, coordinates: GeographicCoordinates) -> bool {
        if coordinates.is_unset() || coordinates == self.coordinates {
            return false;
        }
        let was_unset: bool = self.coordinates.is_unset();
        for (column, old, new) in [
            (
                "latitude",
                self.coordinates.latitude(),
                coordinates.latitude(),
            ),
            (
                "longitude",
                self.coordinates.longitude(),
                coordinates.longitude(),
            ),
        ] {
            let old: String = if was_unset {
                String::new()
            } else {
                old.to_string()
            };
            let new: String = new.to_string();
            if old != new {
                self.tracked.log_edit(column, &old, &new);
            }
        }
        self.coordinates = coordinates;
        true
    }

    /// Sets the annual fee. Zero is ignored.
    pub fn set_firm_fee(&mut self, fee: Money) -> bool {
        self.tracked.set_money("firm_fee", &mut self.firm_fee, fee)
    }

    /// Sets the renewal month. [`Month::None`] is ignored.
    pub fn set_contract_month(&mut self, month: Month) -> bool {
        if month.is_none() {
            return false;
        }
        self.tracked
            .set_value("contract_month", &mut self.contract_month, month)
    }

    pub fn set_active(&mut self, active: bool) -> bool {
        self.tracked.set_value("active", &mut self.active, active)
    }

    pub fn set_notes(&mut self, notes: &str) -> bool {
        self.tracked.set_text("notes", &mut self.notes, notes)
    }

    /// Straight-line distance in miles, when both buildings are located.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> Option<f64> {
        if self.coordinates.is_unset() || other.coordinates.is_unset() {
            return None;
        }
        Some(self.coordinates.distance_miles(&other.coordinates))
    }

    /// Buildings owned by a company, in identity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn for_company<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        company_id: i64,
    ) -> Result<Vec<Self>, CoreError> {
        let predicate: Predicate =
            Predicate::eq(ColumnValue::integer("company_id", Some(company_id))?);
        Self::load_where(gateway, Some(&predicate))
    }

    /// Buildings whose contract renews in `month`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be hydrated.
    pub fn renewing_in<G: QueryGateway + ?Sized>(
        gateway: &mut G,
        month: Month,
    ) -> Result<Vec<Self>, CoreError> {
        let predicate: Predicate = Predicate::eq(ColumnValue::integer(
            "contract_month",
            Some(i64::from(month.number())),
        )?)
        .and(ColumnValue::boolean("active", true)?);
        Self::load_where(gateway, Some(&predicate))
    }

    /// Elevators in this building. Empty for an unsaved building.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn elevators<G: QueryGateway + ?Sized>(
        &self,
        gateway: &mut G,
    ) -> Result<Vec<Elevator>, CoreError> {
        match self.id() {
            Some(id) => Elevator::for_building(gateway, id),
            None => Ok(Vec::new()),
        }
    }
}

impl Record for Building {
    const NAME: &'static str = "Building";
    const TABLE: &'static str = "building";
    const ID_COLUMN: &'static str = "building_id";

    fn tracked(&self) -> &TrackedRecord {
        &self.tracked
    }

    fn tracked_mut(&mut self) -> &mut TrackedRecord {
        &mut self.tracked
    }

    fn column_values(&self) -> Result<Vec<ColumnValue>, CoreError> {
        let address: Option<&Address> = self.address.as_ref();
        let state: Option<String> = address.map(|a| a.state().to_string());
        Ok(vec![
            ColumnValue::integer("company_id", Some(self.company_id))?,
            ColumnValue::text("name", Some(&self.name))?,
            ColumnValue::text("street", address.map(Address::street))?,
            ColumnValue::text("city", address.map(Address::city))?,
            ColumnValue::text("state", state.as_deref())?,
            ColumnValue::text("zip", address.map(Address::zip))?,
            ColumnValue::text("county", self.county.as_ref().map(County::as_str))?,
            ColumnValue::double("latitude", self.coordinates.latitude())?,
            ColumnValue::double("longitude", self.coordinates.longitude())?,
            ColumnValue::money("firm_fee", self.firm_fee)?,
            ColumnValue::integer(
                "contract_month",
                Some(i64::from(self.contract_month.number())),
            )?,
            ColumnValue::boolean("active", self.active)?,
            ColumnValue::text("notes", Some(&self.notes))?,
        ])
    }

    fn from_row(row: &Row) -> Result<Self, CoreError> {
        let id: Option<i64> = row.optional_integer(Self::ID_COLUMN);
        let county: Option<County> = row
            .optional_text("county")
            .map(|name| name.parse::<County>())
            .transpose()?;
        let coordinates: GeographicCoordinates =
            GeographicCoordinates::new(row.float("latitude"), row.float("longitude"))
                .unwrap_or_else(|err| {
                    warn!(record = Self::NAME, id, error = %err, "Ignoring stored coordinates");
                    GeographicCoordinates::unset()
                });

        Ok(Self {
            tracked: TrackedRecord::hydrated(Self::NAME, id),
            company_id: row.integer("company_id"),
            name: row.text("name"),
            address: address_from_row(Self::NAME, id, row),
            county,
            coordinates,
            firm_fee: row.money("firm_fee"),
            contract_month: Month::from_number(row.integer("contract_month"))?,
            active: row.boolean("active"),
            notes: row.text("notes"),
        })
    }

    fn check_duplicate<G: QueryGateway + ?Sized>(&self, gateway: &mut G) -> Result<(), CoreError> {
        let query: SelectQuery = SelectQuery::raw(format!(
            "SELECT * FROM {} WHERE company_id = ? AND lower(name) = lower(?) ORDER BY {}",
            Self::TABLE,
            Self::ID_COLUMN
        ))
        .bind(SqlValue::Integer(self.company_id))
        .bind(SqlValue::Text(self.name.clone()));

        match gateway.select(&query)?.first() {
            Some(row) => Err(CoreError::DuplicateEntry(Box::new(
                DuplicateEntry::Building(Self::from_row(row)?),
            ))),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.address {
            Some(address) => write!(f, "{} ({address})", self.name),
            None => f.write_str(&self.name),
        }
    }
}
