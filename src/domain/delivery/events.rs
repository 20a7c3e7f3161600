//! Domain events emitted by contextual content delivery.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContentId, EntryId, EventId, Timestamp, UserId};
use crate::domain::urgency::UrgencyLevel;
use crate::domain_event;

use super::DeliveryTier;

/// Published when an entry crosses the crisis threshold.
///
/// Downstream systems (escalation hooks, on-call tooling) subscribe to
/// this; the pipeline itself does no counselor routing. Indicators are
/// structured markers, never entry text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisAlertRaised {
    pub event_id: EventId,
    pub entry_id: EntryId,
    pub owner: UserId,
    pub score: u32,
    pub level: UrgencyLevel,
    pub indicators: Vec<String>,
    pub occurred_at: Timestamp,
}

domain_event!(
    CrisisAlertRaised,
    event_type = "crisis.alert_raised.v1",
    aggregate_id = entry_id,
    aggregate_type = "Entry",
    occurred_at = occurred_at,
    event_id = event_id
);

impl CrisisAlertRaised {
    pub fn new(
        entry_id: EntryId,
        owner: UserId,
        score: u32,
        level: UrgencyLevel,
        indicators: Vec<String>,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            entry_id,
            owner,
            score,
            level,
            indicators,
            occurred_at,
        }
    }
}

/// Published after content is selected for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDelivered {
    pub event_id: EventId,
    pub owner: UserId,
    /// Entry that triggered the delivery, absent for on-demand
    /// recommendations.
    pub entry_id: Option<EntryId>,
    pub tier: DeliveryTier,
    pub content_ids: Vec<ContentId>,
    pub occurred_at: Timestamp,
}

domain_event!(
    ContentDelivered,
    event_type = "content.delivered.v1",
    aggregate_id = owner,
    aggregate_type = "Delivery",
    occurred_at = occurred_at,
    event_id = event_id
);

impl ContentDelivered {
    pub fn new(
        owner: UserId,
        entry_id: Option<EntryId>,
        tier: DeliveryTier,
        content_ids: Vec<ContentId>,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            owner,
            entry_id,
            tier,
            content_ids,
            occurred_at,
        }
    }
}
