//! In-memory event bus implementation for testing.
//!
//! Provides synchronous, deterministic event capture for unit and
//! integration tests.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus for testing.
///
/// Captures every published envelope for assertions.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("entry.synced.v1"));
/// ```
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events (for test assertions).
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .clear();
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published_events()
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        let mut published = self
            .published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned");
        published.extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Entry", json!({}))
    }

    #[tokio::test]
    async fn publish_captures_events_in_order() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("entry.synced.v1", "e-1")).await.unwrap();
        bus.publish(envelope("crisis.alert_raised.v1", "e-2"))
            .await
            .unwrap();

        assert_eq!(bus.event_count(), 2);
        assert_eq!(bus.published_events()[0].event_type, "entry.synced.v1");
        assert!(bus.has_event("crisis.alert_raised.v1"));
    }

    #[tokio::test]
    async fn publish_all_extends_the_log() {
        let bus = InMemoryEventBus::new();

        bus.publish_all(vec![
            envelope("entry.synced.v1", "e-1"),
            envelope("entry.synced.v1", "e-2"),
        ])
        .await
        .unwrap();

        assert_eq!(bus.events_of_type("entry.synced.v1").len(), 2);
        assert_eq!(bus.events_for_aggregate("e-2").len(), 1);
    }

    #[tokio::test]
    async fn clear_resets_the_log() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("entry.synced.v1", "e-1")).await.unwrap();
        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
