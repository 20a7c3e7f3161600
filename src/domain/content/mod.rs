//! Content module - evidence-tagged catalog item types.
//!
//! The catalog itself is an external collaborator; these are the value
//! types the pipeline reads from it.

mod category;
mod evidence;
mod item;

pub use category::ContentCategory;
pub use evidence::EvidenceLevel;
pub use item::{ContentItem, ContentLevel, PriorityScore, SeasonalWindow};
