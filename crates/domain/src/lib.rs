// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Value types and closed vocabularies shared by every inspection record.
//!
//! Everything in this crate validates at construction time. A value that
//! exists is a value that passed its rules, so entity setters can reject bad
//! input before touching any field or recording an edit.

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

mod address;
mod coordinates;
mod email;
mod error;
mod money;
mod telephone;
mod vocabulary;

#[cfg(test)]
mod tests;

pub use address::{Address, StateCode};
pub use coordinates::GeographicCoordinates;
pub use email::EmailAddress;
pub use error::DomainError;
pub use money::Money;
pub use telephone::TelephoneNumber;
pub use vocabulary::{County, ElevatorType, Month};
