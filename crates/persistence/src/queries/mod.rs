// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads that go through the Diesel DSL rather than the dynamic gateway.

pub mod audit;

pub use audit::{count_edit_log, edit_history};
