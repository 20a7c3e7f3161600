//! Per-mutation sync outcomes and the batch result.

use crate::domain::entry::Entry;
use crate::domain::foundation::{DomainError, EntryId, EntryVersion, MobileId};

use super::SyncCheckpoint;

/// What happened to one mutation in a batch.
///
/// A conflict carries the full server copy and both versions so the
/// device can resolve locally; the server never picks a winner.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Created {
        mobile_id: MobileId,
        entry_id: EntryId,
        version: EntryVersion,
    },
    Updated {
        mobile_id: MobileId,
        entry_id: EntryId,
        version: EntryVersion,
    },
    Conflict {
        mobile_id: MobileId,
        server_entry: Box<Entry>,
        stored_version: EntryVersion,
        claimed_version: EntryVersion,
    },
    Rejected {
        mobile_id: String,
        error: DomainError,
    },
}

impl SyncOutcome {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result of one sync call: per-item outcomes in submitted order, the
/// summary counts, and the server changes the device still needs.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub outcomes: Vec<SyncOutcome>,
    pub created: u32,
    pub updated: u32,
    pub conflicts: u32,
    pub rejected: u32,
    /// Entries changed on the server since the device's last checkpoint.
    pub server_changes: Vec<Entry>,
    pub checkpoint: SyncCheckpoint,
}

impl SyncResult {
    /// Assembles the result, deriving counts from the outcomes.
    pub fn new(
        outcomes: Vec<SyncOutcome>,
        server_changes: Vec<Entry>,
        checkpoint: SyncCheckpoint,
    ) -> Self {
        let mut created = 0;
        let mut updated = 0;
        let mut conflicts = 0;
        let mut rejected = 0;
        for outcome in &outcomes {
            match outcome {
                SyncOutcome::Created { .. } => created += 1,
                SyncOutcome::Updated { .. } => updated += 1,
                SyncOutcome::Conflict { .. } => conflicts += 1,
                SyncOutcome::Rejected { .. } => rejected += 1,
            }
        }
        Self {
            outcomes,
            created,
            updated,
            conflicts,
            rejected,
            server_changes,
            checkpoint,
        }
    }
}
