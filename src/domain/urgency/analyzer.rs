//! Additive, rule-based urgency analysis.
//!
//! An explicit point table with named constants, not conditionals buried
//! in branches: every threshold here is unit-testable in isolation. The
//! analyzer is a pure function; identical input always produces identical
//! output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entry::{Entry, EntryType};

use super::keywords::scan_crisis_language;

// Point table
const HIGH_STRESS_FLOOR: u8 = 4; // stress >= 4/5
const HIGH_STRESS_POINTS: u32 = 3;
const LOW_MOOD_CEILING: u8 = 2; // mood <= 2/10
const LOW_MOOD_POINTS: u32 = 4;
const CRISIS_KEYWORD_POINTS: u32 = 2; // per matched pattern
const LOW_ENERGY_CEILING: u8 = 3; // energy <= 3/10
const LOW_ENERGY_POINTS: u32 = 1;
const SAFETY_CONCERN_POINTS: u32 = 2;

// Level thresholds
pub const CRITICAL_THRESHOLD: u32 = 7;
pub const HIGH_THRESHOLD: u32 = 5;
pub const MEDIUM_THRESHOLD: u32 = 3;
pub const LOW_THRESHOLD: u32 = 1;

/// Score at or above which crisis hand-off is signaled.
pub const CRISIS_SCORE_THRESHOLD: u32 = 6;

// Recurring-pattern signal over recent history
const RECURRING_PATTERN_MIN_HITS: usize = 3;

// Confidence model
const CONFIDENCE_BASE: f64 = 0.25;
const CONFIDENCE_PER_METRIC: f64 = 0.15;
const CONFIDENCE_CONTENT: f64 = 0.1;
const CONFIDENCE_PER_POINT: f64 = 0.03;

/// Signal category attached to an urgency result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyCategory {
    StressManagement,
    MoodCrisisSupport,
    RecurringPattern,
}

impl UrgencyCategory {
    /// Returns the wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StressManagement => "stress_management",
            Self::MoodCrisisSupport => "mood_crisis_support",
            Self::RecurringPattern => "recurring_pattern",
        }
    }
}

impl fmt::Display for UrgencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency level derived from the accumulated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Maps a score onto a level through the fixed thresholds.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= CRITICAL_THRESHOLD => Self::Critical,
            s if s >= HIGH_THRESHOLD => Self::High,
            s if s >= MEDIUM_THRESHOLD => Self::Medium,
            s if s >= LOW_THRESHOLD => Self::Low,
            _ => Self::None,
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// When detected urgency warrants delivering content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTiming {
    /// Deliver in the response to the triggering request.
    Immediate,
    /// Deliver within the day (urgent tier).
    SameDay,
    /// Deliver at the next routine touchpoint.
    Routine,
}

impl DeliveryTiming {
    fn for_level(level: UrgencyLevel) -> Self {
        match level {
            UrgencyLevel::Critical | UrgencyLevel::High => Self::Immediate,
            UrgencyLevel::Medium => Self::SameDay,
            UrgencyLevel::Low | UrgencyLevel::None => Self::Routine,
        }
    }
}

/// Output of urgency analysis for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyResult {
    pub score: u32,
    pub level: UrgencyLevel,
    pub categories: Vec<UrgencyCategory>,
    /// Structured markers (`crisis_language:<slug>`), never raw entry text.
    pub crisis_indicators: Vec<String>,
    pub crisis_detected: bool,
    pub delivery_timing: DeliveryTiming,
    pub confidence: f64,
}

/// Analyzes a single entry, with optional recent history for pattern
/// detection.
///
/// The additive point table:
/// - stress >= 4 adds 3 points and `stress_management`
/// - mood <= 2 adds 4 points, `mood_crisis_support`, and triggers the
///   crisis-keyword scan (2 points per matched pattern)
/// - energy <= 3 adds 1 point
/// - a safety-concern entry adds 2 points
///
/// When `mood_crisis_support` is present the level is floored at `High`
/// even if the raw score maps lower: a mood at the crisis ceiling always
/// warrants urgent delivery regardless of the other metrics.
pub fn analyze(entry: &Entry, recent: &[Entry]) -> UrgencyResult {
    let mut score: u32 = 0;
    let mut categories = Vec::new();
    let mut crisis_indicators = Vec::new();

    if entry.stress().map_or(false, |s| s.as_u8() >= HIGH_STRESS_FLOOR) {
        score += HIGH_STRESS_POINTS;
        categories.push(UrgencyCategory::StressManagement);
    }

    let mood_crisis = entry.mood().map_or(false, |m| m.as_u8() <= LOW_MOOD_CEILING);
    if mood_crisis {
        score += LOW_MOOD_POINTS;
        categories.push(UrgencyCategory::MoodCrisisSupport);

        for slug in scan_crisis_language(entry.content()) {
            score += CRISIS_KEYWORD_POINTS;
            crisis_indicators.push(format!("crisis_language:{}", slug));
        }
    }

    if entry.energy().map_or(false, |e| e.as_u8() <= LOW_ENERGY_CEILING) {
        score += LOW_ENERGY_POINTS;
    }

    if entry.entry_type() == EntryType::SafetyConcern {
        score += SAFETY_CONCERN_POINTS;
    }

    if recurring_distress(recent) {
        categories.push(UrgencyCategory::RecurringPattern);
    }

    let mut level = UrgencyLevel::from_score(score);
    if mood_crisis && level < UrgencyLevel::High {
        level = UrgencyLevel::High;
    }

    UrgencyResult {
        score,
        level,
        categories,
        crisis_indicators,
        crisis_detected: score >= CRISIS_SCORE_THRESHOLD,
        delivery_timing: DeliveryTiming::for_level(level),
        confidence: confidence(entry, score),
    }
}

/// True when at least three recent entries already carried distress
/// signals (crisis-level mood or high stress).
fn recurring_distress(recent: &[Entry]) -> bool {
    let hits = recent
        .iter()
        .filter(|e| {
            e.mood().map_or(false, |m| m.as_u8() <= LOW_MOOD_CEILING)
                || e.stress().map_or(false, |s| s.as_u8() >= HIGH_STRESS_FLOOR)
        })
        .count();
    hits >= RECURRING_PATTERN_MIN_HITS
}

fn confidence(entry: &Entry, score: u32) -> f64 {
    let mut value = CONFIDENCE_BASE;
    for populated in [
        entry.mood().is_some(),
        entry.stress().is_some(),
        entry.energy().is_some(),
    ] {
        if populated {
            value += CONFIDENCE_PER_METRIC;
        }
    }
    if !entry.content().trim().is_empty() {
        value += CONFIDENCE_CONTENT;
    }
    value += score as f64 * CONFIDENCE_PER_POINT;
    value.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{EnergyScore, EntryDraft, MoodScore, StressScore};
    use crate::domain::foundation::{MobileId, TenantId, Timestamp, UserId};

    fn entry_with(
        entry_type: EntryType,
        content: &str,
        mood: Option<u8>,
        stress: Option<u8>,
        energy: Option<u8>,
    ) -> Entry {
        let draft = EntryDraft::new(
            entry_type,
            Timestamp::from_unix_secs(1_705_276_800),
            content.to_string(),
            mood.map(|m| MoodScore::new(m).unwrap()),
            stress.map(|s| StressScore::new(s).unwrap()),
            energy.map(|e| EnergyScore::new(e).unwrap()),
            vec![],
            vec![],
        )
        .unwrap();
        Entry::create(
            UserId::new("user-1".to_string()).unwrap(),
            TenantId::new(),
            MobileId::new("device-a:1".to_string()).unwrap(),
            draft,
            Timestamp::from_unix_secs(1_705_276_800),
        )
    }

    #[test]
    fn calm_entry_scores_zero() {
        let entry = entry_with(EntryType::Journal, "good day", Some(8), Some(1), Some(8));
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, 0);
        assert_eq!(result.level, UrgencyLevel::None);
        assert!(!result.crisis_detected);
        assert_eq!(result.delivery_timing, DeliveryTiming::Routine);
    }

    #[test]
    fn high_stress_alone_adds_three_points() {
        let entry = entry_with(EntryType::Journal, "deadline pressure", Some(7), Some(4), None);
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, 3);
        assert_eq!(result.level, UrgencyLevel::Medium);
        assert_eq!(result.delivery_timing, DeliveryTiming::SameDay);
        assert_eq!(result.categories, vec![UrgencyCategory::StressManagement]);
    }

    #[test]
    fn high_stress_with_good_mood_has_no_mood_contribution() {
        // Property: stress >= 4 with mood >= 7 reflects only the stress
        // signal.
        let entry = entry_with(EntryType::Journal, "stressful but upbeat", Some(9), Some(5), None);
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, 3);
        assert!(result.categories.contains(&UrgencyCategory::StressManagement));
        assert!(!result.categories.contains(&UrgencyCategory::MoodCrisisSupport));
        assert!(result.crisis_indicators.is_empty());
    }

    #[test]
    fn low_mood_scores_at_least_four_and_floors_at_high() {
        for mood in [1, 2] {
            let entry = entry_with(EntryType::Journal, "rough patch", Some(mood), None, None);
            let result = analyze(&entry, &[]);

            assert!(result.score >= 4);
            assert!(result.level >= UrgencyLevel::High);
        }
    }

    #[test]
    fn keyword_scan_only_runs_for_crisis_mood() {
        // Same crisis text, but mood well above the ceiling.
        let entry = entry_with(EntryType::Journal, "felt hopeless last year", Some(6), None, None);
        let result = analyze(&entry, &[]);

        assert!(result.crisis_indicators.is_empty());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn crisis_scenario_scores_critical_with_immediate_timing() {
        // mood=1 (4) + stress=5 (3) + one crisis keyword (2) = 9
        let entry = entry_with(
            EntryType::Journal,
            "everything feels hopeless",
            Some(1),
            Some(5),
            None,
        );
        let result = analyze(&entry, &[]);

        assert!(result.score >= 9);
        assert_eq!(result.level, UrgencyLevel::Critical);
        assert!(result.crisis_detected);
        assert_eq!(result.delivery_timing, DeliveryTiming::Immediate);
        assert_eq!(
            result.crisis_indicators,
            vec!["crisis_language:hopelessness".to_string()]
        );
    }

    #[test]
    fn indicators_are_structured_markers_not_raw_text() {
        let entry = entry_with(
            EntryType::Journal,
            "I keep thinking there is no way out",
            Some(2),
            None,
            None,
        );
        let result = analyze(&entry, &[]);

        for indicator in &result.crisis_indicators {
            assert!(indicator.starts_with("crisis_language:"));
            assert!(!indicator.contains("no way out"));
        }
    }

    #[test]
    fn low_energy_adds_one_point() {
        let entry = entry_with(EntryType::Journal, "tired", Some(6), Some(1), Some(2));
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, 1);
        assert_eq!(result.level, UrgencyLevel::Low);
    }

    #[test]
    fn safety_concern_type_adds_two_points() {
        let entry = entry_with(EntryType::SafetyConcern, "worried about my safety", None, None, None);
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, 2);
        assert_eq!(result.level, UrgencyLevel::Low);
    }

    #[test]
    fn crisis_detected_exactly_at_threshold() {
        // stress=5 (3) + safety concern (2) + energy=1 (1) = 6
        let entry = entry_with(EntryType::SafetyConcern, "on edge", Some(7), Some(5), Some(1));
        let result = analyze(&entry, &[]);

        assert_eq!(result.score, CRISIS_SCORE_THRESHOLD);
        assert!(result.crisis_detected);
        assert_eq!(result.level, UrgencyLevel::High);
    }

    #[test]
    fn recurring_distress_in_history_adds_pattern_category() {
        let entry = entry_with(EntryType::Journal, "meh", Some(5), None, None);
        let history: Vec<Entry> = (0..3)
            .map(|_| entry_with(EntryType::Journal, "bad day", Some(2), None, None))
            .collect();

        let result = analyze(&entry, &history);
        assert!(result.categories.contains(&UrgencyCategory::RecurringPattern));

        let quiet = analyze(&entry, &history[..2]);
        assert!(!quiet.categories.contains(&UrgencyCategory::RecurringPattern));
    }

    #[test]
    fn confidence_grows_with_populated_metrics_and_score() {
        let sparse = entry_with(EntryType::Journal, "note", None, None, None);
        let dense = entry_with(EntryType::Journal, "note", Some(5), Some(2), Some(5));
        assert!(analyze(&dense, &[]).confidence > analyze(&sparse, &[]).confidence);

        let calm = entry_with(EntryType::Journal, "note", Some(8), Some(1), Some(8));
        let distressed = entry_with(EntryType::Journal, "note", Some(1), Some(5), Some(1));
        assert!(analyze(&distressed, &[]).confidence > analyze(&calm, &[]).confidence);
    }

    #[test]
    fn confidence_caps_at_one() {
        let entry = entry_with(
            EntryType::SafetyConcern,
            "hopeless, worthless, no way out, giving up, thinking of suicide",
            Some(1),
            Some(5),
            Some(1),
        );
        let result = analyze(&entry, &[]);
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn analysis_is_deterministic() {
        let entry = entry_with(EntryType::Journal, "hopeless again", Some(2), Some(4), Some(3));
        let first = analyze(&entry, &[]);
        let second = analyze(&entry, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn level_thresholds_match_table() {
        assert_eq!(UrgencyLevel::from_score(0), UrgencyLevel::None);
        assert_eq!(UrgencyLevel::from_score(1), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::from_score(2), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::from_score(3), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_score(4), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_score(5), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_score(6), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_score(7), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_score(40), UrgencyLevel::Critical);
    }
}
