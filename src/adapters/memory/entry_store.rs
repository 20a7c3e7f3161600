//! In-memory entry store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::entry::Entry;
use crate::domain::foundation::{
    DomainError, EntryId, EntryVersion, ErrorCode, MobileId, Timestamp, UserId,
};
use crate::ports::{EntryStore, PutOutcome};

/// In-memory `EntryStore` with real compare-and-set semantics.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Test use only.
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<EntryId, Entry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, deleted ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("InMemoryEntryStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        let entries = self
            .entries
            .read()
            .expect("InMemoryEntryStore: lock poisoned");
        Ok(entries.get(&id).cloned())
    }

    async fn get_by_mobile_id(
        &self,
        owner: &UserId,
        mobile_id: &MobileId,
    ) -> Result<Option<Entry>, DomainError> {
        let entries = self
            .entries
            .read()
            .expect("InMemoryEntryStore: lock poisoned");
        Ok(entries
            .values()
            .find(|e| e.owner() == owner && e.mobile_id() == mobile_id)
            .cloned())
    }

    async fn put(
        &self,
        entry: Entry,
        expected_version: Option<EntryVersion>,
    ) -> Result<PutOutcome, DomainError> {
        let mut entries = self
            .entries
            .write()
            .expect("InMemoryEntryStore: lock poisoned");

        match expected_version {
            None => {
                // Create: the (owner, mobile_id) pair must still be unused.
                if let Some(existing) = entries
                    .values()
                    .find(|e| e.owner() == entry.owner() && e.mobile_id() == entry.mobile_id())
                {
                    return Ok(PutOutcome::Conflict {
                        stored: Box::new(existing.clone()),
                    });
                }
                entries.insert(entry.id(), entry);
                Ok(PutOutcome::Stored)
            }
            Some(expected) => {
                let stored = entries.get_mut(&entry.id()).ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::EntryNotFound,
                        format!("Entry {} not found for versioned write", entry.id()),
                    )
                })?;
                if stored.version() != expected {
                    return Ok(PutOutcome::Conflict {
                        stored: Box::new(stored.clone()),
                    });
                }
                *stored = entry;
                Ok(PutOutcome::Stored)
            }
        }
    }

    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
        include_deleted: bool,
    ) -> Result<Vec<Entry>, DomainError> {
        let entries = self
            .entries
            .read()
            .expect("InMemoryEntryStore: lock poisoned");

        let mut result: Vec<Entry> = entries
            .values()
            .filter(|e| e.owner() == owner)
            .filter(|e| include_deleted || !e.is_deleted())
            .filter(|e| since.map_or(true, |ts| e.updated_at() > ts))
            .cloned()
            .collect();
        result.sort_by_key(|e| (e.updated_at(), e.id().to_string()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{EntryDraft, EntryType, MoodScore};
    use crate::domain::foundation::TenantId;

    fn owner() -> UserId {
        UserId::new("user-1".to_string()).unwrap()
    }

    fn entry(mobile_id: &str, occurred: u64) -> Entry {
        let draft = EntryDraft::new(
            EntryType::Journal,
            Timestamp::from_unix_secs(occurred),
            "text".to_string(),
            Some(MoodScore::new(5).unwrap()),
            None,
            None,
            vec![],
            vec![],
        )
        .unwrap();
        Entry::create(
            owner(),
            TenantId::new(),
            MobileId::new(mobile_id.to_string()).unwrap(),
            draft,
            Timestamp::from_unix_secs(occurred),
        )
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let store = InMemoryEntryStore::new();
        let e = entry("d:1", 1_705_276_800);

        assert!(matches!(
            store.put(e.clone(), None).await.unwrap(),
            PutOutcome::Stored
        ));
        assert_eq!(store.get(e.id()).await.unwrap().unwrap().id(), e.id());
        assert!(store
            .get_by_mobile_id(&owner(), e.mobile_id())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn duplicate_mobile_id_create_conflicts() {
        let store = InMemoryEntryStore::new();
        let first = entry("d:1", 1_705_276_800);
        let second = entry("d:1", 1_705_363_200);

        store.put(first.clone(), None).await.unwrap();
        match store.put(second, None).await.unwrap() {
            PutOutcome::Conflict { stored } => assert_eq!(stored.id(), first.id()),
            PutOutcome::Stored => panic!("duplicate create must conflict"),
        }
    }

    #[tokio::test]
    async fn stale_expected_version_conflicts() {
        let store = InMemoryEntryStore::new();
        let mut e = entry("d:1", 1_705_276_800);
        store.put(e.clone(), None).await.unwrap();

        // Advance the stored copy past version 1.
        e.apply_update(
            EntryDraft::new(
                EntryType::Journal,
                Timestamp::from_unix_secs(1_705_363_200),
                "updated".to_string(),
                None,
                None,
                None,
                vec![],
                vec![],
            )
            .unwrap(),
            EntryVersion::from_u32(2).unwrap(),
            Timestamp::from_unix_secs(1_705_363_200),
        )
        .unwrap();
        store
            .put(e.clone(), Some(EntryVersion::initial()))
            .await
            .unwrap();

        // A writer that still expects version 1 loses the race.
        let outcome = store
            .put(e.clone(), Some(EntryVersion::initial()))
            .await
            .unwrap();
        assert!(matches!(outcome, PutOutcome::Conflict { .. }));
    }

    #[tokio::test]
    async fn query_filters_deleted_and_since() {
        let store = InMemoryEntryStore::new();
        let kept = entry("d:1", 1_705_276_800);
        let mut gone = entry("d:2", 1_705_276_900);
        store.put(kept.clone(), None).await.unwrap();

        gone.mark_deleted(
            EntryVersion::from_u32(2).unwrap(),
            Timestamp::from_unix_secs(1_705_363_200),
        )
        .unwrap();
        store.put(gone.clone(), None).await.unwrap();

        let visible = store.query_by_owner(&owner(), None, false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id(), kept.id());

        let all = store.query_by_owner(&owner(), None, true).await.unwrap();
        assert_eq!(all.len(), 2);

        let after = store
            .query_by_owner(&owner(), Some(Timestamp::from_unix_secs(1_705_300_000)), true)
            .await
            .unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id(), gone.id());
    }
}
