//! Catalog content item and its value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ContentId, TenantId, ValidationError};

use super::{ContentCategory, EvidenceLevel};

/// Editorial priority of a content item, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityScore(u8);

impl PriorityScore {
    pub const MAX: u8 = 100;

    /// Creates a priority score, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::out_of_range(
                "priority",
                0,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PriorityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Depth level of a content item, used for preference matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLevel {
    Introductory,
    Intermediate,
    Advanced,
}

impl ContentLevel {
    /// Parses a level from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "introductory" => Some(Self::Introductory),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introductory => "introductory",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ContentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Months of the year during which seasonal content is active.
///
/// The window is inclusive and may wrap the year boundary
/// (e.g., November through February).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalWindow {
    pub start_month: u8,
    pub end_month: u8,
}

impl SeasonalWindow {
    /// Creates a window, validating month bounds.
    pub fn new(start_month: u8, end_month: u8) -> Result<Self, ValidationError> {
        for (field, value) in [("start_month", start_month), ("end_month", end_month)] {
            if !(1..=12).contains(&value) {
                return Err(ValidationError::out_of_range(field, 1, 12, value as i32));
            }
        }
        Ok(Self {
            start_month,
            end_month,
        })
    }

    /// True when the given month (1-12) falls inside the window.
    pub fn contains(&self, month: u8) -> bool {
        if self.start_month <= self.end_month {
            (self.start_month..=self.end_month).contains(&month)
        } else {
            month >= self.start_month || month <= self.end_month
        }
    }
}

/// Read-only content item from the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub tenant: TenantId,
    pub title: String,
    pub category: ContentCategory,
    pub evidence: EvidenceLevel,
    pub priority: PriorityScore,
    pub level: ContentLevel,
    pub tags: Vec<String>,
    pub seasonal: Option<SeasonalWindow>,
    pub active: bool,
}

impl ContentItem {
    /// True when the item may be shown during the given month.
    pub fn in_season(&self, month: u8) -> bool {
        self.seasonal.map_or(true, |window| window.contains(month))
    }
}
