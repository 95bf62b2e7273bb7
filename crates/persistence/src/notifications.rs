// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data-changed notifications.
//!
//! After every successful write the gateway tells anyone listening which
//! table changed. Notifications are informational only: listeners re-query
//! for the actual data.

use liftbook::{ChangeKind, WriteIntent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum number of notifications buffered per receiver.
/// Slow receivers lose the oldest ones.
const EVENT_BUFFER_SIZE: usize = 100;

/// One successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataChanged {
    pub kind: ChangeKind,
    pub table: String,
    /// The affected row, when the statement targets one.
    pub row_id: Option<i64>,
}

impl From<WriteIntent> for DataChanged {
    fn from(intent: WriteIntent) -> Self {
        Self {
            kind: intent.kind,
            table: intent.table,
            row_id: intent.row_id,
        }
    }
}

/// Thin wrapper around `tokio::sync::broadcast`.
#[derive(Debug, Clone)]
pub struct ChangeBroadcaster {
    tx: broadcast::Sender<DataChanged>,
}

impl ChangeBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Sends to every current receiver. Never blocks.
    pub fn broadcast(&self, event: &DataChanged) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast data change");
            }
            Err(_) => {
                debug!(?event, "No receivers for data change");
            }
        }
    }

    /// Receives notifications sent from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
