//! Urgency module - pure, table-driven analysis of a single entry.

mod analyzer;
mod keywords;

pub use analyzer::{
    analyze, DeliveryTiming, UrgencyCategory, UrgencyLevel, UrgencyResult, CRISIS_SCORE_THRESHOLD,
    CRITICAL_THRESHOLD, HIGH_THRESHOLD, LOW_THRESHOLD, MEDIUM_THRESHOLD,
};
pub use keywords::scan_crisis_language;
