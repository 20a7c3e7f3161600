//! Sync checkpoint handed back to the device.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Watermark the device stores and submits as `last_sync` on its next
/// call. Server changes are queried strictly after this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCheckpoint {
    pub synced_at: Timestamp,
}

impl SyncCheckpoint {
    pub fn at(synced_at: Timestamp) -> Self {
        Self { synced_at }
    }
}
