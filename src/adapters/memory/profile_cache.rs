//! In-memory TTL profile cache for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::UserProfile;
use crate::ports::ProfileCache;

/// In-memory `ProfileCache` with per-entry expiry.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Test use only.
pub struct InMemoryProfileCache {
    entries: RwLock<HashMap<String, (UserProfile, Instant)>>,
}

impl InMemoryProfileCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Live (unexpired) entry count.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .expect("InMemoryProfileCache: lock poisoned")
            .values()
            .filter(|(_, deadline)| *deadline > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProfileCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileCache for InMemoryProfileCache {
    async fn get(&self, owner: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let entries = self
            .entries
            .read()
            .expect("InMemoryProfileCache: lock poisoned");
        Ok(entries.get(owner.as_str()).and_then(|(profile, deadline)| {
            if *deadline > Instant::now() {
                Some(profile.clone())
            } else {
                None
            }
        }))
    }

    async fn put(
        &self,
        owner: &UserId,
        profile: UserProfile,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        self.entries
            .write()
            .expect("InMemoryProfileCache: lock poisoned")
            .insert(owner.as_str().to_string(), (profile, Instant::now() + ttl));
        Ok(())
    }

    async fn invalidate(&self, owner: &UserId) -> Result<(), DomainError> {
        self.entries
            .write()
            .expect("InMemoryProfileCache: lock poisoned")
            .remove(owner.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::profile::ProfileWindow;

    fn owner() -> UserId {
        UserId::new("user-1".to_string()).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::insufficient_data(
            owner(),
            ProfileWindow::ending_at(Timestamp::from_unix_secs(1_705_276_800), 30),
        )
    }

    #[tokio::test]
    async fn put_get_invalidate_cycle() {
        let cache = InMemoryProfileCache::new();
        assert!(cache.get(&owner()).await.unwrap().is_none());

        cache
            .put(&owner(), profile(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.get(&owner()).await.unwrap().is_some());

        cache.invalidate(&owner()).await.unwrap();
        assert!(cache.get(&owner()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let cache = InMemoryProfileCache::new();
        cache
            .put(&owner(), profile(), Duration::from_millis(0))
            .await
            .unwrap();

        assert!(cache.get(&owner()).await.unwrap().is_none());
        assert!(cache.is_empty());
    }
}
