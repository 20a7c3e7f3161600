//! SyncEntriesHandler - conflict-safe batch sync from devices.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entry::{Entry, EntrySynced};
use crate::domain::foundation::{
    DomainError, ErrorCode, SerializableDomainEvent, TenantId, Timestamp, UserId,
};
use crate::domain::sync::{SyncBatch, SyncCheckpoint, SyncOutcome, SyncResult};
use crate::domain::urgency::DeliveryTiming;
use crate::ports::{EntryStore, EventPublisher, ProfileCache, PutOutcome, TextRedactor};

use super::{AnalyzeEntryHandler, DeliverContextualContentHandler};

/// Applies a device's mutation batch and returns the server's view.
///
/// Mutations are processed in submitted order and isolated from each
/// other: a rejected or conflicting item never blocks the rest of the
/// batch. Conflicts are reported as data carrying the full server copy;
/// the server never merges or picks a winner. Accepted writes that
/// land a live entry immediately run urgency analysis so crisis content
/// reaches the device in the same round-trip window.
pub struct SyncEntriesHandler {
    entry_store: Arc<dyn EntryStore>,
    publisher: Arc<dyn EventPublisher>,
    cache: Arc<dyn ProfileCache>,
    analyzer: Arc<AnalyzeEntryHandler>,
    delivery: Arc<DeliverContextualContentHandler>,
    redactor: Arc<dyn TextRedactor>,
}

impl SyncEntriesHandler {
    pub fn new(
        entry_store: Arc<dyn EntryStore>,
        publisher: Arc<dyn EventPublisher>,
        cache: Arc<dyn ProfileCache>,
        analyzer: Arc<AnalyzeEntryHandler>,
        delivery: Arc<DeliverContextualContentHandler>,
        redactor: Arc<dyn TextRedactor>,
    ) -> Self {
        Self {
            entry_store,
            publisher,
            cache,
            analyzer,
            delivery,
            redactor,
        }
    }

    pub async fn handle(
        &self,
        owner: &UserId,
        tenant: TenantId,
        batch: SyncBatch,
        last_sync: Option<Timestamp>,
        include_deleted: bool,
        now: Timestamp,
    ) -> Result<SyncResult, DomainError> {
        let mut outcomes = Vec::with_capacity(batch.len());
        let mut accepted_any = false;

        for mutation in &batch.mutations {
            let outcome = self.apply_one(owner, tenant, mutation, now).await;
            if matches!(
                outcome,
                SyncOutcome::Created { .. } | SyncOutcome::Updated { .. }
            ) {
                accepted_any = true;
            }
            outcomes.push(outcome);
        }

        if accepted_any {
            if let Err(e) = self.cache.invalidate(owner).await {
                warn!(owner = %owner, error = %e, "Profile cache invalidation failed");
            }
        }

        let server_changes = self
            .entry_store
            .query_by_owner(owner, last_sync, include_deleted)
            .await?;

        Ok(SyncResult::new(
            outcomes,
            server_changes,
            SyncCheckpoint::at(now),
        ))
    }

    async fn apply_one(
        &self,
        owner: &UserId,
        tenant: TenantId,
        mutation: &crate::domain::sync::EntryMutation,
        now: Timestamp,
    ) -> SyncOutcome {
        let validated = match mutation.validate() {
            Ok(v) => v,
            Err(error) => {
                // Entry text is user-written; redact before it touches a log.
                debug!(
                    mobile_id = %mutation.mobile_id,
                    code = %error.code,
                    content = %self.redactor.redact(&mutation.content),
                    "Mutation failed validation"
                );
                return SyncOutcome::Rejected {
                    mobile_id: mutation.mobile_id.clone(),
                    error,
                }
            }
        };

        let existing = match self
            .entry_store
            .get_by_mobile_id(owner, &validated.mobile_id)
            .await
        {
            Ok(existing) => existing,
            Err(error) => {
                return SyncOutcome::Rejected {
                    mobile_id: mutation.mobile_id.clone(),
                    error,
                }
            }
        };

        match existing {
            None => {
                let entry = Entry::create(
                    owner.clone(),
                    tenant,
                    validated.mobile_id.clone(),
                    validated.draft,
                    now,
                );
                match self.entry_store.put(entry.clone(), None).await {
                    Ok(PutOutcome::Stored) => {
                        self.after_accepted(&entry, true, now).await;
                        SyncOutcome::Created {
                            mobile_id: validated.mobile_id,
                            entry_id: entry.id(),
                            version: entry.version(),
                        }
                    }
                    Ok(PutOutcome::Conflict { stored }) => SyncOutcome::Conflict {
                        mobile_id: validated.mobile_id,
                        stored_version: stored.version(),
                        claimed_version: validated.claimed_version,
                        server_entry: stored,
                    },
                    Err(error) => SyncOutcome::Rejected {
                        mobile_id: mutation.mobile_id.clone(),
                        error,
                    },
                }
            }
            Some(existing) => {
                let mut updated = existing.clone();
                if let Err(error) =
                    updated.apply_update(validated.draft, validated.claimed_version, now)
                {
                    if error.code == ErrorCode::VersionConflict {
                        return SyncOutcome::Conflict {
                            mobile_id: validated.mobile_id,
                            stored_version: existing.version(),
                            claimed_version: validated.claimed_version,
                            server_entry: Box::new(existing),
                        };
                    }
                    return SyncOutcome::Rejected {
                        mobile_id: mutation.mobile_id.clone(),
                        error,
                    };
                }

                match self
                    .entry_store
                    .put(updated.clone(), Some(existing.version()))
                    .await
                {
                    Ok(PutOutcome::Stored) => {
                        self.after_accepted(&updated, false, now).await;
                        SyncOutcome::Updated {
                            mobile_id: validated.mobile_id,
                            entry_id: updated.id(),
                            version: updated.version(),
                        }
                    }
                    // Lost the compare-and-set race to another device.
                    Ok(PutOutcome::Conflict { stored }) => SyncOutcome::Conflict {
                        mobile_id: validated.mobile_id,
                        stored_version: stored.version(),
                        claimed_version: validated.claimed_version,
                        server_entry: stored,
                    },
                    Err(error) => SyncOutcome::Rejected {
                        mobile_id: mutation.mobile_id.clone(),
                        error,
                    },
                }
            }
        }
    }

    /// Post-write pipeline for an accepted mutation: event, analysis,
    /// and content delivery. All best-effort; the write already stands.
    async fn after_accepted(&self, entry: &Entry, created: bool, now: Timestamp) {
        let synced = EntrySynced::new(
            entry.id(),
            entry.owner().clone(),
            entry.mobile_id().clone(),
            entry.version(),
            created,
            now,
        );
        if let Err(e) = self.publisher.publish(synced.to_envelope()).await {
            warn!(entry_id = %entry.id(), error = %e, "Entry-synced event publish failed");
        }

        if entry.is_deleted() {
            return;
        }

        let urgency = self.analyzer.handle(entry).await;
        if urgency.delivery_timing == DeliveryTiming::Immediate || created {
            self.delivery.handle(entry, &urgency, now).await;
        }
    }
}
