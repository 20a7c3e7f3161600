//! BuildProfileHandler - cached, time-bounded profile building.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::entry::Entry;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::interaction::InteractionEvent;
use crate::domain::profile::{build_profile, ProfileWindow, UserProfile};
use crate::ports::{EntryStore, InteractionStore, ProfileCache};

/// Builds the rolling user profile, reading through the cache.
///
/// The build is bounded: if pulling history exceeds the timeout, the
/// handler degrades to an insufficient-data profile instead of holding
/// up delivery. Cache failures degrade to a rebuild.
pub struct BuildProfileHandler {
    entry_store: Arc<dyn EntryStore>,
    interaction_store: Arc<dyn InteractionStore>,
    cache: Arc<dyn ProfileCache>,
    window_days: u32,
    cache_ttl: Duration,
    build_timeout: Duration,
}

impl BuildProfileHandler {
    pub fn new(
        entry_store: Arc<dyn EntryStore>,
        interaction_store: Arc<dyn InteractionStore>,
        cache: Arc<dyn ProfileCache>,
        window_days: u32,
        cache_ttl: Duration,
        build_timeout: Duration,
    ) -> Self {
        Self {
            entry_store,
            interaction_store,
            cache,
            window_days,
            cache_ttl,
            build_timeout,
        }
    }

    pub async fn handle(&self, owner: &UserId, now: Timestamp) -> UserProfile {
        match self.cache.get(owner).await {
            Ok(Some(profile)) => return profile,
            Ok(None) => {}
            Err(e) => warn!(owner = %owner, error = %e, "Profile cache read failed; rebuilding"),
        }

        let window = ProfileWindow::ending_at(now, self.window_days);
        let profile = match tokio::time::timeout(self.build_timeout, self.fetch_history(owner, window))
            .await
        {
            Ok(Ok((entries, interactions))) => {
                build_profile(owner.clone(), window, &entries, &interactions)
            }
            Ok(Err(e)) => {
                warn!(owner = %owner, error = %e, "History unavailable; using neutral profile");
                UserProfile::insufficient_data(owner.clone(), window)
            }
            Err(_) => {
                warn!(owner = %owner, "Profile build timed out; using neutral profile");
                UserProfile::insufficient_data(owner.clone(), window)
            }
        };

        if let Err(e) = self.cache.put(owner, profile.clone(), self.cache_ttl).await {
            warn!(owner = %owner, error = %e, "Profile cache write failed");
        }

        profile
    }

    async fn fetch_history(
        &self,
        owner: &UserId,
        window: ProfileWindow,
    ) -> Result<(Vec<Entry>, Vec<InteractionEvent>), DomainError> {
        let entries = self
            .entry_store
            .query_by_owner(owner, None, false)
            .await?
            .into_iter()
            .filter(|e| window.contains(e.occurred_at()))
            .collect();
        let interactions = self
            .interaction_store
            .query_by_owner(owner, Some(window.since))
            .await?;
        Ok((entries, interactions))
    }
}
