// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wait for a locked database before a statement fails.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

const UNKNOWN_USER: &str = "unknown";

/// Where the database lives and who audit rows are attributed to.
///
/// The user name travels beside the connection, never inside the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub database_url: String,
    pub user_name: String,
    pub connect_timeout: Duration,
}

impl ConnectionSettings {
    /// Settings for `database_url`, attributed to the session user.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            user_name: session_user(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Overrides the user name. Blank input keeps the current one.
    #[must_use]
    pub fn with_user_name(mut self, user_name: Option<&str>) -> Self {
        if let Some(user_name) = user_name.map(str::trim).filter(|u| !u.is_empty()) {
            self.user_name = user_name.to_string();
        }
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Whether the URL names a memory-only database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_url == ":memory:" || self.database_url.contains("mode=memory")
    }

    /// Database name without directories or URL options.
    #[must_use]
    pub fn database_name(&self) -> &str {
        let path: &str = self
            .database_url
            .strip_prefix("file:")
            .unwrap_or(&self.database_url);
        let path: &str = path.split('?').next().unwrap_or(path);
        path.rsplit(['/', '\\']).next().unwrap_or(path)
    }

    /// Connection descriptor for logs: `server=...;database=...;connection timeout=...`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "server=localhost;database={};connection timeout={}",
            self.database_name(),
            self.connect_timeout.as_secs()
        )
    }
}

/// `USER`, then `USERNAME`, then `"unknown"`.
#[must_use]
pub fn session_user() -> String {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}
