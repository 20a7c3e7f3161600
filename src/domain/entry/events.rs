//! Domain events emitted by the sync pipeline for entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EntryId, EntryVersion, EventId, MobileId, Timestamp, UserId};
use crate::domain_event;

/// Published at the end of a sync round-trip for each accepted mutation.
///
/// Carries only structured identifiers; never entry text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySynced {
    pub event_id: EventId,
    pub entry_id: EntryId,
    pub owner: UserId,
    pub mobile_id: MobileId,
    pub version: EntryVersion,
    pub created: bool,
    pub occurred_at: Timestamp,
}

domain_event!(
    EntrySynced,
    event_type = "entry.synced.v1",
    aggregate_id = entry_id,
    aggregate_type = "Entry",
    occurred_at = occurred_at,
    event_id = event_id
);

impl EntrySynced {
    /// Creates the event for an accepted create or update.
    pub fn new(
        entry_id: EntryId,
        owner: UserId,
        mobile_id: MobileId,
        version: EntryVersion,
        created: bool,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            entry_id,
            owner,
            mobile_id,
            version,
            created,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn entry_synced_envelope_has_structured_payload_only() {
        let event = EntrySynced::new(
            EntryId::new(),
            UserId::new("user-1".to_string()).unwrap(),
            MobileId::new("device-a:1".to_string()).unwrap(),
            EntryVersion::initial(),
            true,
            Timestamp::from_unix_secs(1_705_276_800),
        );

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "entry.synced.v1");
        assert_eq!(envelope.aggregate_type, "Entry");
        assert!(envelope.payload.get("content").is_none());
        assert_eq!(envelope.payload["created"], true);
    }
}
