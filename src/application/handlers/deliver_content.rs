//! DeliverContextualContentHandler - urgency-driven content selection.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::domain::content::{ContentItem, EvidenceLevel};
use crate::domain::delivery::{
    categories_for, crisis_categories, ContentDelivered, CrisisAlertRaised, DeliveryTier,
};
use crate::domain::entry::Entry;
use crate::domain::foundation::{SerializableDomainEvent, Timestamp};
use crate::domain::interaction::{InteractionEvent, InteractionType};
use crate::domain::recommendation::recommend;
use crate::domain::urgency::{UrgencyLevel, UrgencyResult};
use crate::ports::{CatalogFilters, ContentCatalog, EventPublisher, InteractionStore};

use super::BuildProfileHandler;

/// Items delivered in the crisis tier.
const CRISIS_LIMIT: usize = 2;

/// Selects content for an analyzed entry by delivery tier.
///
/// Content delivery is support, not a transaction: any dependency
/// failure degrades to fewer (or zero) items with a warning, never an
/// error to the caller.
pub struct DeliverContextualContentHandler {
    catalog: Arc<dyn ContentCatalog>,
    interaction_store: Arc<dyn InteractionStore>,
    profiles: Arc<BuildProfileHandler>,
    publisher: Arc<dyn EventPublisher>,
    targeted_limit: usize,
    routine_limit: usize,
    routine_exclusion_days: u32,
    general_exclusion_days: u32,
}

impl DeliverContextualContentHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<dyn ContentCatalog>,
        interaction_store: Arc<dyn InteractionStore>,
        profiles: Arc<BuildProfileHandler>,
        publisher: Arc<dyn EventPublisher>,
        targeted_limit: usize,
        routine_limit: usize,
        routine_exclusion_days: u32,
        general_exclusion_days: u32,
    ) -> Self {
        Self {
            catalog,
            interaction_store,
            profiles,
            publisher,
            targeted_limit,
            routine_limit,
            routine_exclusion_days,
            general_exclusion_days,
        }
    }

    pub async fn handle(
        &self,
        entry: &Entry,
        urgency: &UrgencyResult,
        now: Timestamp,
    ) -> Vec<ContentItem> {
        let tier = DeliveryTier::from_urgency(urgency);
        let items = match tier {
            DeliveryTier::Crisis => self.deliver_crisis(entry, urgency, now).await,
            DeliveryTier::Targeted => self.deliver_targeted(entry, urgency, now).await,
            DeliveryTier::Routine => self.deliver_routine(entry, urgency.level, now).await,
        };

        if !items.is_empty() {
            let event = ContentDelivered::new(
                entry.owner().clone(),
                Some(entry.id()),
                tier,
                items.iter().map(|i| i.id).collect(),
                now,
            );
            if let Err(e) = self.publisher.publish(event.to_envelope()).await {
                warn!(owner = %entry.owner(), error = %e, "Content-delivered event publish failed");
            }
        }

        items
    }

    /// Crisis tier: evidence-restricted support content, top priority
    /// first, with a Viewed interaction recorded per item and a crisis
    /// alert fired.
    async fn deliver_crisis(
        &self,
        entry: &Entry,
        urgency: &UrgencyResult,
        now: Timestamp,
    ) -> Vec<ContentItem> {
        let filters = CatalogFilters::for_categories(crisis_categories(urgency))
            .with_min_evidence(EvidenceLevel::CRISIS_MINIMUM);
        let mut items = match self.catalog.query_active(entry.tenant(), &filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(owner = %entry.owner(), error = %e, "Catalog unavailable during crisis delivery");
                return Vec::new();
            }
        };

        items.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.id.to_string().cmp(&b.id.to_string()))
        });
        items.truncate(CRISIS_LIMIT);

        for item in &items {
            let interaction = InteractionEvent::record(
                entry.owner().clone(),
                item,
                Some(entry.id()),
                InteractionType::Viewed,
                now,
            )
            .with_delivery_snapshot(entry.mood(), entry.stress());
            if let Err(e) = self.interaction_store.append(interaction).await {
                warn!(owner = %entry.owner(), error = %e, "Failed to record crisis delivery interaction");
            }
        }

        let alert = CrisisAlertRaised::new(
            entry.id(),
            entry.owner().clone(),
            urgency.score,
            urgency.level,
            urgency.crisis_indicators.clone(),
            now,
        );
        if let Err(e) = self.publisher.publish(alert.to_envelope()).await {
            warn!(owner = %entry.owner(), error = %e, "Crisis alert publish failed");
        }

        items
    }

    /// Targeted tier: mapped urgency categories, best scores win, no
    /// diversity spreading.
    async fn deliver_targeted(
        &self,
        entry: &Entry,
        urgency: &UrgencyResult,
        now: Timestamp,
    ) -> Vec<ContentItem> {
        let mut categories = Vec::new();
        for urgency_category in &urgency.categories {
            for mapped in categories_for(*urgency_category) {
                if !categories.contains(mapped) {
                    categories.push(*mapped);
                }
            }
        }

        let filters = CatalogFilters::for_categories(categories);
        let candidates = match self.catalog.query_active(entry.tenant(), &filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(owner = %entry.owner(), error = %e, "Catalog unavailable during targeted delivery");
                return Vec::new();
            }
        };

        let profile = self.profiles.handle(entry.owner(), now).await;
        recommend(&profile, &candidates, self.targeted_limit, false)
            .into_iter()
            .map(|r| r.content)
            .collect()
    }

    /// Routine tier: preference-driven, diversified, skipping content
    /// the user interacted with recently. Low urgency uses the short
    /// exclusion window; no urgency at all uses the wider general one.
    async fn deliver_routine(
        &self,
        entry: &Entry,
        level: UrgencyLevel,
        now: Timestamp,
    ) -> Vec<ContentItem> {
        let exclusion_days = if level == UrgencyLevel::None {
            self.general_exclusion_days
        } else {
            self.routine_exclusion_days
        };
        let profile = self.profiles.handle(entry.owner(), now).await;

        let filters = CatalogFilters::for_categories(profile.preferred_categories.clone());
        let candidates = match self.catalog.query_active(entry.tenant(), &filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(owner = %entry.owner(), error = %e, "Catalog unavailable during routine delivery");
                return Vec::new();
            }
        };

        let exclusion_floor = now.minus_days(exclusion_days as i64);
        let recently_seen: HashSet<String> = match self
            .interaction_store
            .query_by_owner(entry.owner(), Some(exclusion_floor))
            .await
        {
            Ok(events) => events.iter().map(|e| e.content_id().to_string()).collect(),
            Err(e) => {
                warn!(owner = %entry.owner(), error = %e, "Interaction history unavailable; skipping exclusion");
                HashSet::new()
            }
        };

        let fresh: Vec<ContentItem> = candidates
            .into_iter()
            .filter(|item| !recently_seen.contains(&item.id.to_string()))
            .collect();

        recommend(&profile, &fresh, self.routine_limit, true)
            .into_iter()
            .map(|r| r.content)
            .collect()
    }
}
