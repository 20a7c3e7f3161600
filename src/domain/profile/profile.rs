//! Derived user profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::content::{ContentCategory, ContentLevel};
use crate::domain::entry::EntryType;
use crate::domain::foundation::{Timestamp, UserId};

use super::MetricStats;

/// The time window a profile was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileWindow {
    pub since: Timestamp,
    pub until: Timestamp,
}

impl ProfileWindow {
    /// Window ending at `until` and reaching `days` back.
    pub fn ending_at(until: Timestamp, days: u32) -> Self {
        Self {
            since: until.minus_days(days as i64),
            until,
        }
    }

    /// True when the timestamp falls inside the window (inclusive).
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.since && ts <= self.until
    }
}

/// Frequency of one entry type within the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTypeCount {
    pub entry_type: EntryType,
    pub count: u32,
}

/// Rolling statistical profile of a user, derived from entry and
/// interaction history.
///
/// Rebuilt on demand or cached with a short TTL; it is never persisted
/// as a source of truth. Sections with no evidence are `None`/empty, not
/// zero-defaulted — callers must treat absence as "no evidence", not
/// "no preference".
///
/// Maps use `BTreeMap` with string keys so serialization is stable and
/// two builds over the same window compare byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner: UserId,
    pub window: ProfileWindow,
    pub entry_count: u32,
    pub interaction_count: u32,
    pub mood: Option<MetricStats>,
    pub stress: Option<MetricStats>,
    pub energy: Option<MetricStats>,
    /// Top-3 entry types by frequency.
    pub top_entry_types: Vec<EntryTypeCount>,
    /// Top-3 content categories by interaction count, ties broken by
    /// most recent interaction.
    pub preferred_categories: Vec<ContentCategory>,
    /// Most frequently interacted content level, if any interactions exist.
    pub preferred_level: Option<ContentLevel>,
    /// Completed interactions / total interactions; 0.0 with none.
    pub completion_rate: f64,
    /// Mean signed engagement weight across interactions.
    pub engagement_score: f64,
    /// Mean signed engagement weight per category.
    pub category_engagement: BTreeMap<String, f64>,
    /// Mean signed engagement weight per content item, keyed by content id.
    pub content_ratings: BTreeMap<String, f64>,
    /// 0.0-1.0 confidence in this profile based on sample size and
    /// engagement depth.
    pub quality: f64,
}

impl UserProfile {
    /// Neutral profile used when history is unavailable or the build
    /// timed out. Every section reads as "no evidence".
    pub fn insufficient_data(owner: UserId, window: ProfileWindow) -> Self {
        Self {
            owner,
            window,
            entry_count: 0,
            interaction_count: 0,
            mood: None,
            stress: None,
            energy: None,
            top_entry_types: Vec::new(),
            preferred_categories: Vec::new(),
            preferred_level: None,
            completion_rate: 0.0,
            engagement_score: 0.0,
            category_engagement: BTreeMap::new(),
            content_ratings: BTreeMap::new(),
            quality: 0.0,
        }
    }

    /// True when the profile prefers the given category.
    pub fn prefers_category(&self, category: ContentCategory) -> bool {
        self.preferred_categories.contains(&category)
    }

    /// Mean engagement for a category, if any interactions touched it.
    pub fn engagement_for(&self, category: ContentCategory) -> Option<f64> {
        self.category_engagement.get(category.as_str()).copied()
    }

    /// Historical mean engagement for one content item, if known.
    pub fn rating_for(&self, content_id: &str) -> Option<f64> {
        self.content_ratings.get(content_id).copied()
    }
}

/// Sample-count bucket contribution to profile quality.
///
/// Thresholds at 0/7/14/30/60 entries map to 0.0/0.2/0.4/0.6/0.8/1.0.
pub(crate) fn sample_bucket(entry_count: u32) -> f64 {
    match entry_count {
        0 => 0.0,
        1..=6 => 0.2,
        7..=13 => 0.4,
        14..=29 => 0.6,
        30..=59 => 0.8,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_contains_is_inclusive() {
        let until = Timestamp::from_unix_secs(1_705_276_800);
        let window = ProfileWindow::ending_at(until, 30);

        assert!(window.contains(until));
        assert!(window.contains(window.since));
        assert!(!window.contains(until.plus_secs(1)));
        assert!(!window.contains(window.since.minus_days(1)));
    }

    #[test]
    fn sample_buckets_follow_thresholds() {
        assert_eq!(sample_bucket(0), 0.0);
        assert_eq!(sample_bucket(1), 0.2);
        assert_eq!(sample_bucket(6), 0.2);
        assert_eq!(sample_bucket(7), 0.4);
        assert_eq!(sample_bucket(14), 0.6);
        assert_eq!(sample_bucket(30), 0.8);
        assert_eq!(sample_bucket(59), 0.8);
        assert_eq!(sample_bucket(60), 1.0);
    }

    #[test]
    fn insufficient_data_profile_has_no_evidence() {
        let owner = UserId::new("user-1".to_string()).unwrap();
        let window = ProfileWindow::ending_at(Timestamp::from_unix_secs(1_705_276_800), 30);
        let profile = UserProfile::insufficient_data(owner, window);

        assert_eq!(profile.entry_count, 0);
        assert!(profile.mood.is_none());
        assert!(profile.preferred_categories.is_empty());
        assert_eq!(profile.quality, 0.0);
    }
}
