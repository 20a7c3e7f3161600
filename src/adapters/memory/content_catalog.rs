//! In-memory content catalog for testing.

use async_trait::async_trait;
use chrono::Datelike;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::content::ContentItem;
use crate::domain::foundation::{DomainError, ErrorCode, TenantId, Timestamp};
use crate::ports::{CatalogFilters, ContentCatalog};

/// In-memory `ContentCatalog` seeded with fixed items.
///
/// Supports simulated outages so tests can exercise the degraded
/// delivery path.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Test use only.
pub struct InMemoryContentCatalog {
    items: RwLock<Vec<ContentItem>>,
    failing: AtomicBool,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn seeded(items: Vec<ContentItem>) -> Self {
        Self {
            items: RwLock::new(items),
            failing: AtomicBool::new(false),
        }
    }

    pub fn add(&self, item: ContentItem) {
        self.items
            .write()
            .expect("InMemoryContentCatalog: lock poisoned")
            .push(item);
    }

    /// Makes every query fail with a transient error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for InMemoryContentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn query_active(
        &self,
        tenant: TenantId,
        filters: &CatalogFilters,
    ) -> Result<Vec<ContentItem>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::CatalogUnavailable,
                "Content catalog is unavailable",
            ));
        }

        let month = Timestamp::now().as_datetime().month() as u8;
        let items = self
            .items
            .read()
            .expect("InMemoryContentCatalog: lock poisoned");
        Ok(items
            .iter()
            .filter(|i| i.tenant == tenant && i.active)
            .filter(|i| i.in_season(month))
            .filter(|i| filters.matches(i))
            .cloned()
            .collect())
    }
}
