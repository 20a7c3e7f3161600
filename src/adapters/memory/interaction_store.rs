//! In-memory interaction store for testing.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::interaction::InteractionEvent;
use crate::ports::InteractionStore;

/// Append-only in-memory `InteractionStore`.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Test use only.
pub struct InMemoryInteractionStore {
    events: RwLock<Vec<InteractionEvent>>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .expect("InMemoryInteractionStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryInteractionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InteractionStore for InMemoryInteractionStore {
    async fn append(&self, event: InteractionEvent) -> Result<(), DomainError> {
        self.events
            .write()
            .expect("InMemoryInteractionStore: lock poisoned")
            .push(event);
        Ok(())
    }

    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
    ) -> Result<Vec<InteractionEvent>, DomainError> {
        let events = self
            .events
            .read()
            .expect("InMemoryInteractionStore: lock poisoned");
        Ok(events
            .iter()
            .filter(|e| e.owner() == owner)
            .filter(|e| since.map_or(true, |ts| e.occurred_at() >= ts))
            .cloned()
            .collect())
    }
}
