//! Wellness content categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a catalog content item belongs to.
///
/// Crisis-tier delivery always includes `MentalHealth`; the rest map from
/// urgency categories or user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    MentalHealth,
    StressManagement,
    MoodSupport,
    SleepHygiene,
    Mindfulness,
    PhysicalActivity,
    Nutrition,
    SocialConnection,
}

impl ContentCategory {
    /// All categories, in a fixed order (used for deterministic iteration).
    pub const ALL: [ContentCategory; 8] = [
        ContentCategory::MentalHealth,
        ContentCategory::StressManagement,
        ContentCategory::MoodSupport,
        ContentCategory::SleepHygiene,
        ContentCategory::Mindfulness,
        ContentCategory::PhysicalActivity,
        ContentCategory::Nutrition,
        ContentCategory::SocialConnection,
    ];

    /// Parses a category from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mental_health" => Some(Self::MentalHealth),
            "stress_management" => Some(Self::StressManagement),
            "mood_support" => Some(Self::MoodSupport),
            "sleep_hygiene" => Some(Self::SleepHygiene),
            "mindfulness" => Some(Self::Mindfulness),
            "physical_activity" => Some(Self::PhysicalActivity),
            "nutrition" => Some(Self::Nutrition),
            "social_connection" => Some(Self::SocialConnection),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MentalHealth => "mental_health",
            Self::StressManagement => "stress_management",
            Self::MoodSupport => "mood_support",
            Self::SleepHygiene => "sleep_hygiene",
            Self::Mindfulness => "mindfulness",
            Self::PhysicalActivity => "physical_activity",
            Self::Nutrition => "nutrition",
            Self::SocialConnection => "social_connection",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
