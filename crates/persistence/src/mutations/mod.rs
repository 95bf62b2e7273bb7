// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes that go through the Diesel DSL rather than the dynamic gateway.

pub mod audit;

pub use audit::persist_audit_entry;
