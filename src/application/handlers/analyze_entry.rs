//! AnalyzeEntryHandler - urgency classification for one entry.

use std::sync::Arc;
use tracing::warn;

use crate::domain::entry::Entry;
use crate::domain::urgency::{analyze, UrgencyResult};
use crate::ports::EntryStore;

/// Runs the urgency analysis, feeding it recent history for recurring
/// pattern detection.
///
/// History is best-effort: a store failure degrades to analyzing the
/// entry alone instead of failing the operation.
pub struct AnalyzeEntryHandler {
    entry_store: Arc<dyn EntryStore>,
    recent_history_limit: usize,
}

impl AnalyzeEntryHandler {
    pub fn new(entry_store: Arc<dyn EntryStore>, recent_history_limit: usize) -> Self {
        Self {
            entry_store,
            recent_history_limit,
        }
    }

    pub async fn handle(&self, entry: &Entry) -> UrgencyResult {
        let recent = match self
            .entry_store
            .query_by_owner(entry.owner(), None, false)
            .await
        {
            Ok(entries) => {
                let mut recent: Vec<Entry> = entries
                    .into_iter()
                    .filter(|e| e.id() != entry.id())
                    .collect();
                // Most recent first, bounded.
                recent.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));
                recent.truncate(self.recent_history_limit);
                recent
            }
            Err(e) => {
                warn!(
                    owner = %entry.owner(),
                    error = %e,
                    "Recent history unavailable; analyzing entry in isolation"
                );
                Vec::new()
            }
        };

        analyze(entry, &recent)
    }
}
