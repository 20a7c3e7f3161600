//! Content personalization engine.
//!
//! Pure, deterministic scoring of catalog candidates against a user
//! profile. Two sub-scores per item, both clamped to [0, 1]:
//! personalization (fit to this user's history) and effectiveness
//! (evidence strength and observed engagement), combined as their mean.

use std::collections::HashMap;

use crate::domain::content::{ContentCategory, ContentItem, EvidenceLevel};
use crate::domain::profile::UserProfile;

use super::Recommendation;

const PERSONALIZATION_BASE: f64 = 0.5;
const CATEGORY_MATCH_BONUS: f64 = 0.3;
const LEVEL_MATCH_BONUS: f64 = 0.2;
const LOW_MOOD_BONUS: f64 = 0.2;
const HIGH_STRESS_BONUS: f64 = 0.25;
const LOW_ENERGY_BONUS: f64 = 0.15;
const ENGAGEMENT_BONUS: f64 = 0.1;

const LOW_MOOD_MEAN: f64 = 4.0;
const HIGH_STRESS_MEAN: f64 = 3.5;
const LOW_ENERGY_MEAN: f64 = 4.0;

// A lone view scores 1; engagement above that counts as a real signal.
const ENGAGEMENT_NEUTRAL_BASELINE: f64 = 1.0;

const EFFECTIVENESS_BASE: f64 = 0.6;
const EVIDENCE_BONUS: f64 = 0.15;
const RATING_ADJUSTMENT_SCALE: f64 = 0.2;
const COMPLETION_ADJUSTMENT_SCALE: f64 = 0.1;
// Engagement weights top out at 8 (acted upon).
const RATING_FULL_SCALE: f64 = 8.0;

const MOOD_SUPPORT_CATEGORIES: [ContentCategory; 2] =
    [ContentCategory::MoodSupport, ContentCategory::MentalHealth];
const ENERGY_SUPPORT_CATEGORIES: [ContentCategory; 3] = [
    ContentCategory::SleepHygiene,
    ContentCategory::PhysicalActivity,
    ContentCategory::Nutrition,
];

/// Per-category cap when diversity is requested.
pub fn diversity_cap(limit: usize) -> usize {
    (limit / 3).max(1)
}

/// Ranks candidates for a profile.
///
/// With `diversify`, no category takes more than `diversity_cap(limit)`
/// slots while diverse candidates remain; capped categories backfill
/// only once every other candidate is exhausted.
pub fn recommend(
    profile: &UserProfile,
    candidates: &[ContentItem],
    limit: usize,
    diversify: bool,
) -> Vec<Recommendation> {
    if limit == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<Recommendation> = candidates.iter().map(|c| score(profile, c)).collect();
    // Deterministic order: score, then editorial priority, then id.
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.content.priority.cmp(&a.content.priority))
            .then(a.content.id.to_string().cmp(&b.content.id.to_string()))
    });

    if !diversify {
        scored.truncate(limit);
        return scored;
    }

    let cap = diversity_cap(limit);
    let mut taken: HashMap<ContentCategory, usize> = HashMap::new();
    let mut picked: Vec<Recommendation> = Vec::with_capacity(limit);
    let mut overflow: Vec<Recommendation> = Vec::new();

    for rec in scored {
        if picked.len() == limit {
            break;
        }
        let count = taken.entry(rec.content.category).or_insert(0);
        if *count < cap {
            *count += 1;
            picked.push(rec);
        } else {
            overflow.push(rec);
        }
    }

    // Backfill from capped categories, best first, when diverse
    // candidates ran out before the limit.
    for rec in overflow {
        if picked.len() == limit {
            break;
        }
        picked.push(rec);
    }

    picked
}

fn score(profile: &UserProfile, item: &ContentItem) -> Recommendation {
    let (personalization, reason) = personalization(profile, item);
    let effectiveness = effectiveness(profile, item);
    Recommendation {
        content: item.clone(),
        personalization,
        effectiveness,
        score: (personalization + effectiveness) / 2.0,
        reason,
    }
}

/// Computes the personalization sub-score and the reason template for
/// the strongest contributing signal.
fn personalization(profile: &UserProfile, item: &ContentItem) -> (f64, String) {
    let mut total = PERSONALIZATION_BASE;
    // (bonus, reason) pairs; the largest bonus names the recommendation.
    let mut signals: Vec<(f64, String)> = Vec::new();

    if profile.prefers_category(item.category) {
        total += CATEGORY_MATCH_BONUS;
        signals.push((
            CATEGORY_MATCH_BONUS,
            format!("Matches your interest in {}", item.category),
        ));
    }

    if profile.preferred_level == Some(item.level) {
        total += LEVEL_MATCH_BONUS;
        signals.push((
            LEVEL_MATCH_BONUS,
            format!("Pitched at your usual {} level", item.level),
        ));
    }

    if let Some(mood) = &profile.mood {
        if mood.mean <= LOW_MOOD_MEAN && MOOD_SUPPORT_CATEGORIES.contains(&item.category) {
            total += LOW_MOOD_BONUS;
            signals.push((
                LOW_MOOD_BONUS,
                "Mood support for a difficult stretch".to_string(),
            ));
        }
    }

    if let Some(stress) = &profile.stress {
        if stress.mean >= HIGH_STRESS_MEAN && item.category == ContentCategory::StressManagement {
            total += HIGH_STRESS_BONUS;
            signals.push((
                HIGH_STRESS_BONUS,
                "Stress relief for a high-stress period".to_string(),
            ));
        }
    }

    if let Some(energy) = &profile.energy {
        if energy.mean <= LOW_ENERGY_MEAN && ENERGY_SUPPORT_CATEGORIES.contains(&item.category) {
            total += LOW_ENERGY_BONUS;
            signals.push((
                LOW_ENERGY_BONUS,
                "Gentle support for low energy".to_string(),
            ));
        }
    }

    if let Some(engagement) = profile.engagement_for(item.category) {
        if engagement > ENGAGEMENT_NEUTRAL_BASELINE {
            total += ENGAGEMENT_BONUS;
            signals.push((
                ENGAGEMENT_BONUS,
                format!("You engage well with {} content", item.category),
            ));
        }
    }

    let reason = signals
        .into_iter()
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, reason)| reason)
        .unwrap_or_else(|| default_reason(item));

    (total.clamp(0.0, 1.0), reason)
}

fn default_reason(item: &ContentItem) -> String {
    if item.evidence.crisis_eligible() {
        format!("Well-evidenced {} guidance", item.category)
    } else {
        format!("Suggested {} content", item.category)
    }
}

fn effectiveness(profile: &UserProfile, item: &ContentItem) -> f64 {
    let mut total = EFFECTIVENESS_BASE;

    if item.evidence >= EvidenceLevel::PeerReviewed {
        total += EVIDENCE_BONUS;
    }

    // Historical mean engagement with this exact item, scaled into a
    // bounded signed adjustment.
    if let Some(rating) = profile.rating_for(&item.id.to_string()) {
        total += (rating / RATING_FULL_SCALE * RATING_ADJUSTMENT_SCALE)
            .clamp(-RATING_ADJUSTMENT_SCALE, RATING_ADJUSTMENT_SCALE);
    }

    total += profile.completion_rate * COMPLETION_ADJUSTMENT_SCALE;

    total.clamp(0.0, 1.0)
}
