//! Sync status of a wellbeing entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an entry stands in the multi-device sync lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Server and device agree on the current version.
    Synced,
    /// A device holds local changes not yet accepted by the server.
    Pending,
    /// A device mutation was rejected; the device must reconcile.
    Conflict,
    /// A device requested deletion that has not completed the round-trip.
    PendingDelete,
}

impl SyncStatus {
    /// Parses a status from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "synced" => Some(Self::Synced),
            "pending" => Some(Self::Pending),
            "conflict" => Some(Self::Conflict),
            "pending_delete" => Some(Self::PendingDelete),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Pending => "pending",
            Self::Conflict => "conflict",
            Self::PendingDelete => "pending_delete",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            SyncStatus::Synced,
            SyncStatus::Pending,
            SyncStatus::Conflict,
            SyncStatus::PendingDelete,
        ] {
            assert_eq!(SyncStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(SyncStatus::parse("deleted"), None);
    }
}
