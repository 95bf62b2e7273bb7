// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::time::Duration;

/// Running totals over every gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryStatistics {
    pub calls: u64,
    pub round_trips: u64,
    pub rows_selected: u64,
    pub rows_affected: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub execution_time: Duration,
}

impl QueryStatistics {
    /// Figures for a single call.
    #[must_use]
    pub const fn single_call(round_trips: u64, execution_time: Duration) -> Self {
        Self {
            calls: 1,
            round_trips,
            rows_selected: 0,
            rows_affected: 0,
            bytes_sent: 0,
            bytes_received: 0,
            execution_time,
        }
    }
}

impl AddAssign for QueryStatistics {
    fn add_assign(&mut self, rhs: Self) {
        self.calls += rhs.calls;
        self.round_trips += rhs.round_trips;
        self.rows_selected += rhs.rows_selected;
        self.rows_affected += rhs.rows_affected;
        self.bytes_sent += rhs.bytes_sent;
        self.bytes_received += rhs.bytes_received;
        self.execution_time += rhs.execution_time;
    }
}
