// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod notification_tests;
mod record_tests;
mod statistics_tests;

use crate::Persistence;
use liftbook::{Company, Record};

pub const TEST_USER: &str = "inspector";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("Failed to create in-memory database")
        .with_user_name(TEST_USER)
}

/// Commits a company through the full record path and returns its id.
pub fn create_test_company(persistence: &mut Persistence, name: &str) -> i64 {
    let mut company: Company = Company::new("");
    company.set_name(name);
    assert!(company.commit_to_database(persistence).unwrap());
    company.id().unwrap()
}
