//! GetRecommendationsHandler - on-demand personalized recommendations.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::domain::content::ContentItem;
use crate::domain::delivery::{ContentDelivered, DeliveryTier};
use crate::domain::foundation::{SerializableDomainEvent, TenantId, Timestamp, UserId};
use crate::domain::recommendation::{recommend, Recommendation};
use crate::ports::{CatalogFilters, ContentCatalog, EventPublisher, InteractionStore};

use super::BuildProfileHandler;

/// Serves explicit "what should I look at" requests.
///
/// Unlike tiered delivery this draws from the whole active catalog,
/// always diversified, and skips anything the user touched inside the
/// general exclusion window. Degrades to an empty list on catalog
/// failure.
pub struct GetRecommendationsHandler {
    catalog: Arc<dyn ContentCatalog>,
    interaction_store: Arc<dyn InteractionStore>,
    profiles: Arc<BuildProfileHandler>,
    publisher: Arc<dyn EventPublisher>,
    general_exclusion_days: u32,
}

impl GetRecommendationsHandler {
    pub fn new(
        catalog: Arc<dyn ContentCatalog>,
        interaction_store: Arc<dyn InteractionStore>,
        profiles: Arc<BuildProfileHandler>,
        publisher: Arc<dyn EventPublisher>,
        general_exclusion_days: u32,
    ) -> Self {
        Self {
            catalog,
            interaction_store,
            profiles,
            publisher,
            general_exclusion_days,
        }
    }

    pub async fn handle(
        &self,
        owner: &UserId,
        tenant: TenantId,
        limit: usize,
        now: Timestamp,
    ) -> Vec<Recommendation> {
        let candidates = match self
            .catalog
            .query_active(tenant, &CatalogFilters::default())
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!(owner = %owner, error = %e, "Catalog unavailable; returning no recommendations");
                return Vec::new();
            }
        };

        let exclusion_floor = now.minus_days(self.general_exclusion_days as i64);
        let recently_seen: HashSet<String> = match self
            .interaction_store
            .query_by_owner(owner, Some(exclusion_floor))
            .await
        {
            Ok(events) => events.iter().map(|e| e.content_id().to_string()).collect(),
            Err(e) => {
                warn!(owner = %owner, error = %e, "Interaction history unavailable; skipping exclusion");
                HashSet::new()
            }
        };

        let fresh: Vec<ContentItem> = candidates
            .into_iter()
            .filter(|item| !recently_seen.contains(&item.id.to_string()))
            .collect();

        let profile = self.profiles.handle(owner, now).await;
        let recommendations = recommend(&profile, &fresh, limit, true);

        if !recommendations.is_empty() {
            let event = ContentDelivered::new(
                owner.clone(),
                None,
                DeliveryTier::Routine,
                recommendations.iter().map(|r| r.content.id).collect(),
                now,
            );
            if let Err(e) = self.publisher.publish(event.to_envelope()).await {
                warn!(owner = %owner, error = %e, "Content-delivered event publish failed");
            }
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryContentCatalog, InMemoryEntryStore, InMemoryInteractionStore,
        InMemoryProfileCache,
    };
    use crate::domain::content::{
        ContentCategory, ContentLevel, EvidenceLevel, PriorityScore,
    };
    use crate::domain::foundation::ContentId;
    use crate::domain::interaction::{InteractionEvent, InteractionType};
    use crate::ports::InteractionStore as _;

    fn owner() -> UserId {
        UserId::new("user-1".to_string()).unwrap()
    }

    fn item(tenant: TenantId, category: ContentCategory, priority: u8) -> ContentItem {
        ContentItem {
            id: ContentId::new(),
            tenant,
            title: format!("{} item", category),
            category,
            evidence: EvidenceLevel::Professional,
            priority: PriorityScore::new(priority).unwrap(),
            level: ContentLevel::Introductory,
            tags: vec![],
            seasonal: None,
            active: true,
        }
    }

    struct Fixture {
        catalog: Arc<InMemoryContentCatalog>,
        interactions: Arc<InMemoryInteractionStore>,
        bus: Arc<InMemoryEventBus>,
        handler: GetRecommendationsHandler,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryContentCatalog::new());
        let interactions = Arc::new(InMemoryInteractionStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let profiles = Arc::new(BuildProfileHandler::new(
            Arc::new(InMemoryEntryStore::new()),
            interactions.clone(),
            Arc::new(InMemoryProfileCache::new()),
            30,
            Duration::from_secs(300),
            Duration::from_millis(500),
        ));
        let handler = GetRecommendationsHandler::new(
            catalog.clone(),
            interactions.clone(),
            profiles,
            bus.clone(),
            14,
        );
        Fixture {
            catalog,
            interactions,
            bus,
            handler,
        }
    }

    #[tokio::test]
    async fn recommends_from_full_catalog_and_publishes() {
        let f = fixture();
        let tenant = TenantId::new();
        f.catalog.add(item(tenant, ContentCategory::Mindfulness, 80));
        f.catalog.add(item(tenant, ContentCategory::Nutrition, 60));

        let recs = f
            .handler
            .handle(&owner(), tenant, 5, Timestamp::from_unix_secs(1_705_276_800))
            .await;

        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(f.bus.has_event("content.delivered.v1"));
    }

    #[tokio::test]
    async fn excludes_content_seen_inside_the_window() {
        let f = fixture();
        let tenant = TenantId::new();
        let now = Timestamp::from_unix_secs(1_705_276_800);

        let seen = item(tenant, ContentCategory::Mindfulness, 90);
        let long_ago = item(tenant, ContentCategory::Nutrition, 40);
        f.catalog.add(seen.clone());
        f.catalog.add(long_ago.clone());

        f.interactions
            .append(InteractionEvent::record(
                owner(),
                &seen,
                None,
                InteractionType::Viewed,
                now.minus_days(2),
            ))
            .await
            .unwrap();
        // Outside the 14-day window: eligible again.
        f.interactions
            .append(InteractionEvent::record(
                owner(),
                &long_ago,
                None,
                InteractionType::Viewed,
                now.minus_days(30),
            ))
            .await
            .unwrap();

        let recs = f.handler.handle(&owner(), tenant, 5, now).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].content.id, long_ago.id);
    }

    #[tokio::test]
    async fn catalog_outage_returns_empty_without_event() {
        let f = fixture();
        f.catalog.set_failing(true);

        let recs = f
            .handler
            .handle(
                &owner(),
                TenantId::new(),
                5,
                Timestamp::from_unix_secs(1_705_276_800),
            )
            .await;
        assert!(recs.is_empty());
        assert!(!f.bus.has_event("content.delivered.v1"));
    }
}
