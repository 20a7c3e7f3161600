//! Urgency-to-delivery tier mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::content::ContentCategory;
use crate::domain::urgency::{UrgencyCategory, UrgencyLevel, UrgencyResult};

/// Which delivery strategy an urgency result selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTier {
    /// Crisis detected: evidence-restricted support content, delivered
    /// immediately with an alert event.
    Crisis,
    /// High or medium urgency: targeted content from the mapped
    /// categories, no diversity spreading.
    Targeted,
    /// Low or no urgency: preference-driven, diversified suggestions.
    Routine,
}

impl DeliveryTier {
    /// Selects the tier for an analysis result.
    ///
    /// Crisis detection wins over the level; a high level without the
    /// crisis flag stays in the targeted tier.
    pub fn from_urgency(urgency: &UrgencyResult) -> Self {
        if urgency.crisis_detected {
            return Self::Crisis;
        }
        match urgency.level {
            UrgencyLevel::Critical | UrgencyLevel::High | UrgencyLevel::Medium => Self::Targeted,
            UrgencyLevel::Low | UrgencyLevel::None => Self::Routine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Targeted => "targeted",
            Self::Routine => "routine",
        }
    }
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed lookup from an urgency category to the catalog categories that
/// address it.
pub fn categories_for(category: UrgencyCategory) -> &'static [ContentCategory] {
    match category {
        UrgencyCategory::StressManagement => &[
            ContentCategory::StressManagement,
            ContentCategory::Mindfulness,
        ],
        UrgencyCategory::MoodCrisisSupport => &[
            ContentCategory::MoodSupport,
            ContentCategory::MentalHealth,
        ],
        UrgencyCategory::RecurringPattern => &[
            ContentCategory::MentalHealth,
            ContentCategory::Mindfulness,
        ],
    }
}

/// Catalog categories eligible in the crisis tier: mental health plus
/// everything the detected urgency categories map to. Deduplicated,
/// fixed order.
pub fn crisis_categories(urgency: &UrgencyResult) -> Vec<ContentCategory> {
    let mut result = vec![ContentCategory::MentalHealth];
    for category in &urgency.categories {
        for mapped in categories_for(*category) {
            if !result.contains(mapped) {
                result.push(*mapped);
            }
        }
    }
    result
}
