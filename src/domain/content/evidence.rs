//! Evidence level of catalog content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How rigorously a content item's claims are sourced.
///
/// Ordered: `Educational < Professional < PeerReviewed < HealthAuthority`.
/// Crisis-tier delivery may only draw from `PeerReviewed` and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    /// General educational material.
    Educational,
    /// Authored or reviewed by a credentialed professional.
    Professional,
    /// Backed by peer-reviewed research.
    PeerReviewed,
    /// Issued by a public health authority (WHO, CDC).
    HealthAuthority,
}

impl EvidenceLevel {
    /// Minimum level allowed for crisis-tier delivery.
    pub const CRISIS_MINIMUM: EvidenceLevel = EvidenceLevel::PeerReviewed;

    /// True when this level is allowed in crisis-tier delivery.
    pub fn crisis_eligible(&self) -> bool {
        *self >= Self::CRISIS_MINIMUM
    }

    /// Parses a level from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "educational" => Some(Self::Educational),
            "professional" => Some(Self::Professional),
            "peer_reviewed" => Some(Self::PeerReviewed),
            "health_authority" => Some(Self::HealthAuthority),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Educational => "educational",
            Self::Professional => "professional",
            Self::PeerReviewed => "peer_reviewed",
            Self::HealthAuthority => "health_authority",
        }
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_rigor() {
        assert!(EvidenceLevel::Educational < EvidenceLevel::Professional);
        assert!(EvidenceLevel::Professional < EvidenceLevel::PeerReviewed);
        assert!(EvidenceLevel::PeerReviewed < EvidenceLevel::HealthAuthority);
    }

    #[test]
    fn crisis_eligibility_starts_at_peer_reviewed() {
        assert!(!EvidenceLevel::Educational.crisis_eligible());
        assert!(!EvidenceLevel::Professional.crisis_eligible());
        assert!(EvidenceLevel::PeerReviewed.crisis_eligible());
        assert!(EvidenceLevel::HealthAuthority.crisis_eligible());
    }

    #[test]
    fn levels_roundtrip_through_strings() {
        for level in [
            EvidenceLevel::Educational,
            EvidenceLevel::Professional,
            EvidenceLevel::PeerReviewed,
            EvidenceLevel::HealthAuthority,
        ] {
            assert_eq!(EvidenceLevel::parse(level.as_str()), Some(level));
        }
    }
}
