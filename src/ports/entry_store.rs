//! EntryStore port - versioned persistence for wellbeing entries.

use async_trait::async_trait;

use crate::domain::entry::Entry;
use crate::domain::foundation::{DomainError, EntryId, EntryVersion, MobileId, Timestamp, UserId};

/// Result of a compare-and-set write.
///
/// Losing the race is an expected outcome the sync layer reports as
/// data, so it is not an error.
#[derive(Debug, Clone)]
pub enum PutOutcome {
    /// The write was applied.
    Stored,
    /// Another writer got there first; carries the current server copy.
    Conflict { stored: Box<Entry> },
}

/// Port for entry persistence.
///
/// Implementations must ensure:
/// - `put` applies only when the stored version still equals
///   `expected_version` (None for a create); the stored version of an
///   entry strictly increases across accepted writes
/// - soft-deleted entries remain readable when explicitly requested
/// - transient backend failures map to a transient `DomainError`
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Loads an entry by server id.
    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError>;

    /// Loads an entry by its client-generated stable id.
    async fn get_by_mobile_id(
        &self,
        owner: &UserId,
        mobile_id: &MobileId,
    ) -> Result<Option<Entry>, DomainError>;

    /// Compare-and-set write.
    ///
    /// `expected_version` is `None` for a create (the mobile_id must be
    /// unused) and the previously stored version for an update.
    async fn put(
        &self,
        entry: Entry,
        expected_version: Option<EntryVersion>,
    ) -> Result<PutOutcome, DomainError>;

    /// Entries for one owner changed strictly after `since` (all of them
    /// when `since` is `None`), soft-deleted ones only when requested.
    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
        include_deleted: bool,
    ) -> Result<Vec<Entry>, DomainError>;
}
