// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closed vocabularies stored as display strings.
//!
//! Each vocabulary maps its canonical display string to a tag and back.
//! Matching is exact: a stored string that differs in case from the
//! canonical spelling is a data-integrity fault, not a near miss.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maryland jurisdictions served by the inspection business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    Allegany,
    AnneArundel,
    Baltimore,
    BaltimoreCity,
    Calvert,
    Caroline,
    Carroll,
    Cecil,
    Charles,
    Dorchester,
    Frederick,
    Garrett,
    Harford,
    Howard,
    Kent,
    Montgomery,
    PrinceGeorges,
    QueenAnnes,
    StMarys,
    Somerset,
    Talbot,
    Washington,
    Wicomico,
    Worcester,
}

impl County {
    /// Every county, in display order.
    pub const ALL: [Self; 24] = [
        Self::Allegany,
        Self::AnneArundel,
        Self::Baltimore,
        Self::BaltimoreCity,
        Self::Calvert,
        Self::Caroline,
        Self::Carroll,
        Self::Cecil,
        Self::Charles,
        Self::Dorchester,
        Self::Frederick,
        Self::Garrett,
        Self::Harford,
        Self::Howard,
        Self::Kent,
        Self::Montgomery,
        Self::PrinceGeorges,
        Self::QueenAnnes,
        Self::StMarys,
        Self::Somerset,
        Self::Talbot,
        Self::Washington,
        Self::Wicomico,
        Self::Worcester,
    ];

    /// Returns the canonical display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Allegany => "Allegany",
            Self::AnneArundel => "Anne Arundel",
            Self::Baltimore => "Baltimore",
            Self::BaltimoreCity => "Baltimore City",
            Self::Calvert => "Calvert",
            Self::Caroline => "Caroline",
            Self::Carroll => "Carroll",
            Self::Cecil => "Cecil",
            Self::Charles => "Charles",
            Self::Dorchester => "Dorchester",
            Self::Frederick => "Frederick",
            Self::Garrett => "Garrett",
            Self::Harford => "Harford",
            Self::Howard => "Howard",
            Self::Kent => "Kent",
            Self::Montgomery => "Montgomery",
            Self::PrinceGeorges => "Prince George's",
            Self::QueenAnnes => "Queen Anne's",
            Self::StMarys => "St. Mary's",
            Self::Somerset => "Somerset",
            Self::Talbot => "Talbot",
            Self::Washington => "Washington",
            Self::Wicomico => "Wicomico",
            Self::Worcester => "Worcester",
        }
    }
}

impl FromStr for County {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|county| county.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCounty(s.to_string()))
    }
}

impl std::fmt::Display for County {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month, with `None` for "no month selected".
///
/// Stored as a small integer: `None` is 0, January through December are 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Month {
    #[default]
    None,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Every value, `None` first, in numeric order.
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the display string. `None` displays as the empty string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Returns the stored number, 0 for `None`.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    /// Inverse of [`Self::number`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonthNumber` outside 0 through 12.
    pub fn from_number(number: i64) -> Result<Self, DomainError> {
        usize::try_from(number)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(DomainError::InvalidMonthNumber(number))
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for Month {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|month| month.as_str() == s)
            .ok_or_else(|| DomainError::UnknownMonth(s.to_string()))
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of conveyance under inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElevatorType {
    Traction,
    Hydraulic,
    HydraulicLift,
    RopedHydraulic,
    WheelchairLift,
    StairwayChairLift,
    Escalator,
    MovingWalk,
    Dumbwaiter,
    MaterialLift,
}

impl ElevatorType {
    pub const ALL: [Self; 10] = [
        Self::Traction,
        Self::Hydraulic,
        Self::HydraulicLift,
        Self::RopedHydraulic,
        Self::WheelchairLift,
        Self::StairwayChairLift,
        Self::Escalator,
        Self::MovingWalk,
        Self::Dumbwaiter,
        Self::MaterialLift,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Traction => "Traction",
            Self::Hydraulic => "Hydraulic",
            Self::HydraulicLift => "Hydraulic Lift",
            Self::RopedHydraulic => "Roped Hydraulic",
            Self::WheelchairLift => "Wheelchair Lift",
            Self::StairwayChairLift => "Stairway Chair Lift",
            Self::Escalator => "Escalator",
            Self::MovingWalk => "Moving Walk",
            Self::Dumbwaiter => "Dumbwaiter",
            Self::MaterialLift => "Material Lift",
        }
    }
}

impl FromStr for ElevatorType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownElevatorType(s.to_string()))
    }
}

impl std::fmt::Display for ElevatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
