//! Scored recommendation output.

use serde::{Deserialize, Serialize};

use crate::domain::content::ContentItem;

/// One ranked content suggestion.
///
/// The reason is a deterministic template derived from the strongest
/// scoring signal; it never contains user text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub content: ContentItem,
    pub personalization: f64,
    pub effectiveness: f64,
    /// Mean of personalization and effectiveness, both in [0, 1].
    pub score: f64,
    pub reason: String,
}
