// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recognizes connection failures the user can do something about.

use liftbook::ConnectivityFault;

const HOST_NOT_FOUND: &[&str] = &[
    "unable to open database file",
    "Unknown MySQL server host",
    "could not translate host name",
];

const LOGIN_FAILED: &[&str] = &["Access denied", "Login failed", "authentication failed"];

/// Maps a driver message onto a [`ConnectivityFault`].
///
/// Anything unrecognized returns `None` and should be surfaced as-is.
#[must_use]
pub fn classify(message: &str) -> Option<ConnectivityFault> {
    if HOST_NOT_FOUND.iter().any(|needle| message.contains(needle)) {
        Some(ConnectivityFault::HostNotFound)
    } else if LOGIN_FAILED.iter().any(|needle| message.contains(needle)) {
        Some(ConnectivityFault::LoginFailed)
    } else {
        None
    }
}
