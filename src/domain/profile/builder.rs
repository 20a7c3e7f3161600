//! Pure profile aggregation over windowed history.

use std::collections::HashMap;

use crate::domain::content::{ContentCategory, ContentLevel};
use crate::domain::entry::{Entry, EntryType};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::interaction::{InteractionEvent, InteractionType};

use super::profile::sample_bucket;
use super::{EntryTypeCount, MetricStats, ProfileWindow, UserProfile};

const TOP_ENTRY_TYPES: usize = 3;
const TOP_CATEGORIES: usize = 3;

// Quality = sample-bucket term + engagement-depth term.
const QUALITY_SAMPLE_WEIGHT: f64 = 0.7;
const QUALITY_DEPTH_WEIGHT: f64 = 0.3;

// Engagement weights span -2 (dismissed) to 8 (acted upon); used to
// normalize mean engagement into [0, 1].
const ENGAGEMENT_WEIGHT_MIN: f64 = -2.0;
const ENGAGEMENT_WEIGHT_SPAN: f64 = 10.0;

// Fixed order for deterministic tie-breaking of entry-type frequencies.
const ENTRY_TYPE_ORDER: [EntryType; 5] = [
    EntryType::Journal,
    EntryType::MoodCheckin,
    EntryType::Gratitude,
    EntryType::Goal,
    EntryType::SafetyConcern,
];

/// Builds a profile from entry and interaction history.
///
/// Pure and idempotent: inputs are filtered to the window and sorted
/// internally, so the same window over the same history yields an
/// identical profile regardless of input ordering.
pub fn build_profile(
    owner: UserId,
    window: ProfileWindow,
    entries: &[Entry],
    interactions: &[InteractionEvent],
) -> UserProfile {
    let mut entries: Vec<&Entry> = entries
        .iter()
        .filter(|e| !e.is_deleted() && window.contains(e.occurred_at()))
        .collect();
    entries.sort_by_key(|e| (e.occurred_at(), e.id().to_string()));

    let mut interactions: Vec<&InteractionEvent> = interactions
        .iter()
        .filter(|i| window.contains(i.occurred_at()))
        .collect();
    interactions.sort_by_key(|i| (i.occurred_at(), i.id().to_string()));

    let mood_samples: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.mood().map(|m| m.as_u8() as f64))
        .collect();
    let stress_samples: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.stress().map(|s| s.as_u8() as f64))
        .collect();
    let energy_samples: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.energy().map(|en| en.as_u8() as f64))
        .collect();

    let entry_count = entries.len() as u32;
    let interaction_count = interactions.len() as u32;

    let completion_rate = if interactions.is_empty() {
        0.0
    } else {
        let completed = interactions
            .iter()
            .filter(|i| i.interaction_type() == InteractionType::Completed)
            .count();
        completed as f64 / interactions.len() as f64
    };

    let engagement_score = if interactions.is_empty() {
        0.0
    } else {
        interactions.iter().map(|i| i.engagement() as f64).sum::<f64>() / interactions.len() as f64
    };

    let profile_quality = quality(entry_count, completion_rate, engagement_score, !interactions.is_empty());

    UserProfile {
        owner,
        window,
        entry_count,
        interaction_count,
        mood: MetricStats::from_samples(&mood_samples),
        stress: MetricStats::from_samples(&stress_samples),
        energy: MetricStats::from_samples(&energy_samples),
        top_entry_types: top_entry_types(&entries),
        preferred_categories: preferred_categories(&interactions),
        preferred_level: preferred_level(&interactions),
        completion_rate,
        engagement_score,
        category_engagement: category_engagement(&interactions),
        content_ratings: content_ratings(&interactions),
        quality: profile_quality,
    }
}

fn top_entry_types(entries: &[&Entry]) -> Vec<EntryTypeCount> {
    let mut counts: HashMap<EntryType, u32> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.entry_type()).or_insert(0) += 1;
    }

    let mut ranked: Vec<EntryTypeCount> = ENTRY_TYPE_ORDER
        .iter()
        .filter_map(|ty| {
            counts.get(ty).map(|&count| EntryTypeCount {
                entry_type: *ty,
                count,
            })
        })
        .collect();
    // Stable sort keeps the fixed type order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_ENTRY_TYPES);
    ranked
}

fn preferred_categories(interactions: &[&InteractionEvent]) -> Vec<ContentCategory> {
    let mut counts: HashMap<ContentCategory, (u32, Timestamp)> = HashMap::new();
    for event in interactions {
        let slot = counts
            .entry(event.category())
            .or_insert((0, event.occurred_at()));
        slot.0 += 1;
        if event.occurred_at() > slot.1 {
            slot.1 = event.occurred_at();
        }
    }

    let mut ranked: Vec<(ContentCategory, u32, Timestamp)> = ContentCategory::ALL
        .iter()
        .filter_map(|cat| counts.get(cat).map(|&(count, last)| (*cat, count, last)))
        .collect();
    // Count descending, then most recent interaction; the fixed category
    // order above settles exact ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));
    ranked
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(cat, _, _)| cat)
        .collect()
}

fn preferred_level(interactions: &[&InteractionEvent]) -> Option<ContentLevel> {
    let mut counts: HashMap<ContentLevel, (u32, Timestamp)> = HashMap::new();
    for event in interactions {
        let slot = counts
            .entry(event.level())
            .or_insert((0, event.occurred_at()));
        slot.0 += 1;
        if event.occurred_at() > slot.1 {
            slot.1 = event.occurred_at();
        }
    }

    [
        ContentLevel::Introductory,
        ContentLevel::Intermediate,
        ContentLevel::Advanced,
    ]
    .iter()
    .filter_map(|level| counts.get(level).map(|&(count, last)| (*level, count, last)))
    .max_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)))
    .map(|(level, _, _)| level)
}

fn category_engagement(
    interactions: &[&InteractionEvent],
) -> std::collections::BTreeMap<String, f64> {
    let mut sums: HashMap<ContentCategory, (f64, u32)> = HashMap::new();
    for event in interactions {
        let slot = sums.entry(event.category()).or_insert((0.0, 0));
        slot.0 += event.engagement() as f64;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(cat, (sum, n))| (cat.as_str().to_string(), sum / n as f64))
        .collect()
}

fn content_ratings(interactions: &[&InteractionEvent]) -> std::collections::BTreeMap<String, f64> {
    let mut sums: HashMap<String, (f64, u32)> = HashMap::new();
    for event in interactions {
        let slot = sums.entry(event.content_id().to_string()).or_insert((0.0, 0));
        slot.0 += event.engagement() as f64;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(id, (sum, n))| (id, sum / n as f64))
        .collect()
}

fn quality(
    entry_count: u32,
    completion_rate: f64,
    engagement_score: f64,
    has_interactions: bool,
) -> f64 {
    let depth = if has_interactions {
        let normalized =
            ((engagement_score - ENGAGEMENT_WEIGHT_MIN) / ENGAGEMENT_WEIGHT_SPAN).clamp(0.0, 1.0);
        0.5 * completion_rate + 0.5 * normalized
    } else {
        0.0
    };
    QUALITY_SAMPLE_WEIGHT * sample_bucket(entry_count) + QUALITY_DEPTH_WEIGHT * depth
}
