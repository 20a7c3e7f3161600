//! Application handlers - one per exposed pipeline operation.
//!
//! Handlers orchestrate the pure domain logic over the ports. They are
//! the exposed seam of the crate; transport layers (if any) sit on top
//! of these.

mod analyze_entry;
mod build_profile;
mod deliver_content;
mod get_recommendations;
mod sync_entries;

pub use analyze_entry::AnalyzeEntryHandler;
pub use build_profile::BuildProfileHandler;
pub use deliver_content::DeliverContextualContentHandler;
pub use get_recommendations::GetRecommendationsHandler;
pub use sync_entries::SyncEntriesHandler;
