//! End-to-end sync pipeline tests over the in-memory adapters.
//!
//! Exercises the full path a device sync takes: validation, versioned
//! writes, conflict reporting, urgency analysis, and crisis content
//! delivery, all through the public handler API.

use std::sync::Arc;
use std::time::Duration;

use wellspring::adapters::events::InMemoryEventBus;
use wellspring::adapters::memory::{
    InMemoryContentCatalog, InMemoryEntryStore, InMemoryInteractionStore, InMemoryProfileCache,
};
use wellspring::adapters::redaction::RegexRedactor;
use wellspring::application::handlers::{
    AnalyzeEntryHandler, BuildProfileHandler, DeliverContextualContentHandler, SyncEntriesHandler,
};
use wellspring::domain::content::{
    ContentCategory, ContentItem, ContentLevel, EvidenceLevel, PriorityScore,
};
use wellspring::domain::foundation::{ContentId, TenantId, Timestamp, UserId};
use wellspring::domain::sync::{EntryMutation, SyncBatch, SyncOutcome};
use wellspring::ports::InteractionStore;

struct Stack {
    store: Arc<InMemoryEntryStore>,
    catalog: Arc<InMemoryContentCatalog>,
    interactions: Arc<InMemoryInteractionStore>,
    bus: Arc<InMemoryEventBus>,
    sync: SyncEntriesHandler,
    tenant: TenantId,
}

fn stack() -> Stack {
    let store = Arc::new(InMemoryEntryStore::new());
    let catalog = Arc::new(InMemoryContentCatalog::new());
    let interactions = Arc::new(InMemoryInteractionStore::new());
    let cache = Arc::new(InMemoryProfileCache::new());
    let bus = Arc::new(InMemoryEventBus::new());

    let profiles = Arc::new(BuildProfileHandler::new(
        store.clone(),
        interactions.clone(),
        cache.clone(),
        30,
        Duration::from_secs(300),
        Duration::from_millis(500),
    ));
    let delivery = Arc::new(DeliverContextualContentHandler::new(
        catalog.clone(),
        interactions.clone(),
        profiles,
        bus.clone(),
        3,
        2,
        7,
        14,
    ));
    let analyzer = Arc::new(AnalyzeEntryHandler::new(store.clone(), 20));
    let sync = SyncEntriesHandler::new(
        store.clone(),
        bus.clone(),
        cache,
        analyzer,
        delivery,
        Arc::new(RegexRedactor::new()),
    );

    Stack {
        store,
        catalog,
        interactions,
        bus,
        sync,
        tenant: TenantId::new(),
    }
}

fn owner() -> UserId {
    UserId::new("user-1".to_string()).unwrap()
}

fn mutation(mobile_id: &str, version: u32, content: &str) -> EntryMutation {
    EntryMutation {
        mobile_id: mobile_id.to_string(),
        entry_type: "journal".to_string(),
        occurred_at: Timestamp::from_unix_secs(1_705_276_800),
        content: content.to_string(),
        mood: Some(6),
        stress: Some(2),
        energy: Some(7),
        tags: vec![],
        triggers: vec![],
        version,
        deleted: false,
    }
}

fn crisis_item(tenant: TenantId) -> ContentItem {
    ContentItem {
        id: ContentId::new(),
        tenant,
        title: "Grounding techniques for hard moments".to_string(),
        category: ContentCategory::MentalHealth,
        evidence: EvidenceLevel::PeerReviewed,
        priority: PriorityScore::new(95).unwrap(),
        level: ContentLevel::Introductory,
        tags: vec![],
        seasonal: None,
        active: true,
    }
}

#[tokio::test]
async fn second_device_receives_first_devices_entries() {
    let s = stack();
    let t1 = Timestamp::from_unix_secs(1_705_276_900);

    // Device A pushes one entry.
    let result_a = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![mutation("device-a:1", 1, "wrote from the train")]),
            None,
            false,
            t1,
        )
        .await
        .unwrap();
    assert_eq!(result_a.created, 1);

    // Device B syncs an empty batch with no checkpoint and sees it.
    let result_b = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![]),
            None,
            false,
            Timestamp::from_unix_secs(1_705_277_000),
        )
        .await
        .unwrap();

    assert_eq!(result_b.server_changes.len(), 1);
    assert_eq!(result_b.server_changes[0].content(), "wrote from the train");
    assert_eq!(result_b.server_changes[0].mobile_id().as_str(), "device-a:1");

    // A third sync scoped to B's checkpoint sees nothing new.
    let result_b2 = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![]),
            Some(result_b.checkpoint.synced_at),
            false,
            Timestamp::from_unix_secs(1_705_277_100),
        )
        .await
        .unwrap();
    assert!(result_b2.server_changes.is_empty());
}

#[tokio::test]
async fn concurrent_edits_of_one_entry_conflict_with_both_versions() {
    let s = stack();
    let t1 = Timestamp::from_unix_secs(1_705_276_900);

    s.sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![mutation("shared:1", 1, "original")]),
            None,
            false,
            t1,
        )
        .await
        .unwrap();

    // Device A lands its edit first.
    let result_a = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![mutation("shared:1", 2, "edit from device A")]),
            None,
            false,
            Timestamp::from_unix_secs(1_705_277_000),
        )
        .await
        .unwrap();
    assert_eq!(result_a.updated, 1);

    // Device B claims the same version and must get the server copy
    // back instead of silently overwriting.
    let result_b = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![mutation("shared:1", 2, "edit from device B")]),
            None,
            false,
            Timestamp::from_unix_secs(1_705_277_100),
        )
        .await
        .unwrap();

    assert_eq!(result_b.conflicts, 1);
    match &result_b.outcomes[0] {
        SyncOutcome::Conflict {
            server_entry,
            stored_version,
            claimed_version,
            ..
        } => {
            assert_eq!(server_entry.content(), "edit from device A");
            assert_eq!(stored_version.as_u32(), 2);
            assert_eq!(claimed_version.as_u32(), 2);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    // Device A's edit survived untouched.
    use wellspring::ports::EntryStore;
    let stored = s.store.query_by_owner(&owner(), None, false).await.unwrap();
    assert_eq!(stored[0].content(), "edit from device A");
    assert_eq!(stored[0].version().as_u32(), 2);
}

#[tokio::test]
async fn one_bad_mutation_never_blocks_the_rest_of_the_batch() {
    let s = stack();

    let mut bad_type = mutation("device-a:1", 1, "fine text");
    bad_type.entry_type = "horoscope".to_string();
    let mut bad_score = mutation("device-a:2", 1, "fine text");
    bad_score.stress = Some(42);
    let good = mutation("device-a:3", 1, "made it through the day");

    let result = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![bad_type, bad_score, good]),
            None,
            false,
            Timestamp::from_unix_secs(1_705_276_900),
        )
        .await
        .unwrap();

    assert_eq!(result.rejected, 2);
    assert_eq!(result.created, 1);
    assert!(matches!(result.outcomes[2], SyncOutcome::Created { .. }));
    // Outcomes keep submission order so the device can match them up.
    assert!(matches!(result.outcomes[0], SyncOutcome::Rejected { .. }));
    assert!(matches!(result.outcomes[1], SyncOutcome::Rejected { .. }));
}

#[tokio::test]
async fn crisis_entry_gets_content_and_alert_in_the_same_round_trip() {
    let s = stack();
    s.catalog.add(crisis_item(s.tenant));

    let mut distressed = mutation("device-a:1", 1, "everything feels hopeless, no way out");
    distressed.mood = Some(1);
    distressed.stress = Some(5);

    let result = s
        .sync
        .handle(
            &owner(),
            s.tenant,
            SyncBatch::new(vec![distressed]),
            None,
            false,
            Timestamp::from_unix_secs(1_705_276_900),
        )
        .await
        .unwrap();

    assert_eq!(result.created, 1);
    assert!(s.bus.has_event("entry.synced.v1"));
    assert!(s.bus.has_event("crisis.alert_raised.v1"));
    assert!(s.bus.has_event("content.delivered.v1"));

    // Crisis delivery recorded a Viewed interaction with the metric
    // snapshot taken at delivery time.
    let recorded = s.interactions.query_by_owner(&owner(), None).await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].mood_at_delivery().unwrap().as_u8(), 1);
    assert_eq!(recorded[0].stress_at_delivery().unwrap().as_u8(), 5);

    // The alert payload carries structured indicators, never entry text.
    let alert = &s.bus.events_of_type("crisis.alert_raised.v1")[0];
    assert!(alert.payload.get("content").is_none());
    let indicators = alert.payload["indicators"].as_array().unwrap();
    assert!(!indicators.is_empty());
}
