//! ContentCatalog port - read-only view of the external content catalog.

use async_trait::async_trait;

use crate::domain::content::{ContentCategory, ContentItem, ContentLevel, EvidenceLevel};
use crate::domain::foundation::{DomainError, TenantId};

/// Filters for a catalog query. Empty filters match everything active.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilters {
    /// Restrict to these categories; empty means any.
    pub categories: Vec<ContentCategory>,
    /// Require at least this evidence level.
    pub min_evidence: Option<EvidenceLevel>,
    /// Restrict to one depth level.
    pub level: Option<ContentLevel>,
}

impl CatalogFilters {
    pub fn for_categories(categories: Vec<ContentCategory>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn with_min_evidence(mut self, evidence: EvidenceLevel) -> Self {
        self.min_evidence = Some(evidence);
        self
    }

    /// True when the item passes every filter.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&item.category) {
            return false;
        }
        if let Some(min) = self.min_evidence {
            if item.evidence < min {
                return false;
            }
        }
        if let Some(level) = self.level {
            if item.level != level {
                return false;
            }
        }
        true
    }
}

/// Port for querying the content catalog.
///
/// The catalog is an external system; only active, in-season items are
/// returned. Unavailability maps to a transient `DomainError` which the
/// delivery path degrades on rather than propagating.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn query_active(
        &self,
        tenant: TenantId,
        filters: &CatalogFilters,
    ) -> Result<Vec<ContentItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::PriorityScore;
    use crate::domain::foundation::ContentId;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ContentCatalog) {}

    fn item(category: ContentCategory, evidence: EvidenceLevel) -> ContentItem {
        ContentItem {
            id: ContentId::new(),
            tenant: TenantId::new(),
            title: "item".to_string(),
            category,
            evidence,
            priority: PriorityScore::new(50).unwrap(),
            level: ContentLevel::Introductory,
            tags: vec![],
            seasonal: None,
            active: true,
        }
    }

    #[test]
    fn empty_filters_match_anything() {
        let filters = CatalogFilters::default();
        assert!(filters.matches(&item(
            ContentCategory::Nutrition,
            EvidenceLevel::Educational
        )));
    }

    #[test]
    fn category_and_evidence_filters_apply() {
        let filters = CatalogFilters::for_categories(vec![ContentCategory::MentalHealth])
            .with_min_evidence(EvidenceLevel::PeerReviewed);

        assert!(filters.matches(&item(
            ContentCategory::MentalHealth,
            EvidenceLevel::HealthAuthority
        )));
        assert!(!filters.matches(&item(
            ContentCategory::MentalHealth,
            EvidenceLevel::Professional
        )));
        assert!(!filters.matches(&item(
            ContentCategory::Nutrition,
            EvidenceLevel::HealthAuthority
        )));
    }
}
