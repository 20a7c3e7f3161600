//! Interaction events between a user and delivered content.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::content::{ContentCategory, ContentItem, ContentLevel};
use crate::domain::entry::{MoodScore, StressScore};
use crate::domain::foundation::{ContentId, EntryId, InteractionId, Timestamp, UserId};

/// How the user interacted with a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Viewed,
    Completed,
    Dismissed,
    Bookmarked,
    ActedUpon,
}

impl InteractionType {
    /// Signed engagement weight fed into profile statistics.
    ///
    /// Dismissals count against a category; acting on content counts
    /// most strongly for it.
    pub fn engagement_weight(&self) -> i32 {
        match self {
            Self::Viewed => 1,
            Self::Completed => 5,
            Self::Dismissed => -2,
            Self::Bookmarked => 3,
            Self::ActedUpon => 8,
        }
    }

    /// Parses a type from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "viewed" => Some(Self::Viewed),
            "completed" => Some(Self::Completed),
            "dismissed" => Some(Self::Dismissed),
            "bookmarked" => Some(Self::Bookmarked),
            "acted_upon" => Some(Self::ActedUpon),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewed => "viewed",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
            Self::Bookmarked => "bookmarked",
            Self::ActedUpon => "acted_upon",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable record of one user/content interaction.
///
/// Created by the delivery selector or by explicit user action; once
/// created it is never mutated. Feeds user profiles and per-item
/// effectiveness statistics. Carries metric snapshots at delivery time
/// for later analysis, never entry text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    id: InteractionId,
    owner: UserId,
    content_id: ContentId,
    /// Category and level denormalized from the item at record time, so
    /// profile building needs no catalog join.
    category: ContentCategory,
    level: ContentLevel,
    /// Entry that triggered the delivery, when there was one.
    entry_id: Option<EntryId>,
    interaction_type: InteractionType,
    engagement: i32,
    mood_at_delivery: Option<MoodScore>,
    stress_at_delivery: Option<StressScore>,
    occurred_at: Timestamp,
}

impl InteractionEvent {
    /// Records a new interaction; engagement is derived from the type.
    pub fn record(
        owner: UserId,
        content: &ContentItem,
        entry_id: Option<EntryId>,
        interaction_type: InteractionType,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            id: InteractionId::new(),
            owner,
            content_id: content.id,
            category: content.category,
            level: content.level,
            entry_id,
            interaction_type,
            engagement: interaction_type.engagement_weight(),
            mood_at_delivery: None,
            stress_at_delivery: None,
            occurred_at,
        }
    }

    /// Attaches the metric snapshot captured at delivery time.
    pub fn with_delivery_snapshot(
        mut self,
        mood: Option<MoodScore>,
        stress: Option<StressScore>,
    ) -> Self {
        self.mood_at_delivery = mood;
        self.stress_at_delivery = stress;
        self
    }

    /// Rebuilds an event from persisted state. Adapter use only.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: InteractionId,
        owner: UserId,
        content_id: ContentId,
        category: ContentCategory,
        level: ContentLevel,
        entry_id: Option<EntryId>,
        interaction_type: InteractionType,
        engagement: i32,
        mood_at_delivery: Option<MoodScore>,
        stress_at_delivery: Option<StressScore>,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            content_id,
            category,
            level,
            entry_id,
            interaction_type,
            engagement,
            mood_at_delivery,
            stress_at_delivery,
            occurred_at,
        }
    }

    // Getters
    pub fn id(&self) -> InteractionId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn content_id(&self) -> ContentId {
        self.content_id
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn level(&self) -> ContentLevel {
        self.level
    }

    pub fn entry_id(&self) -> Option<EntryId> {
        self.entry_id
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.interaction_type
    }

    pub fn engagement(&self) -> i32 {
        self.engagement
    }

    pub fn mood_at_delivery(&self) -> Option<MoodScore> {
        self.mood_at_delivery
    }

    pub fn stress_at_delivery(&self) -> Option<StressScore> {
        self.stress_at_delivery
    }

    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }
}
