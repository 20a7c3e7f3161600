//! Bounded wellbeing metric value objects.
//!
//! Each score validates its range at construction so the rest of the
//! pipeline never has to re-check bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Self-reported mood on a 1 (worst) to 10 (best) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a mood score, rejecting values outside 1-10.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "mood",
                Self::MIN as i32,
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

impl fmt::Display for MoodScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported stress on a 1 (calm) to 5 (overwhelmed) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StressScore(u8);

impl StressScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a stress score, rejecting values outside 1-5.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "stress",
                Self::MIN as i32,
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

impl fmt::Display for StressScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported energy on a 1 (depleted) to 10 (energized) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyScore(u8);

impl EnergyScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates an energy score, rejecting values outside 1-10.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "energy",
                Self::MIN as i32,
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

impl fmt::Display for EnergyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_score_accepts_bounds() {
        assert_eq!(MoodScore::new(1).unwrap().as_u8(), 1);
        assert_eq!(MoodScore::new(10).unwrap().as_u8(), 10);
    }

    #[test]
    fn mood_score_rejects_out_of_range() {
        assert!(MoodScore::new(0).is_err());
        assert!(MoodScore::new(11).is_err());
    }

    #[test]
    fn stress_score_bounds() {
        assert!(StressScore::new(0).is_err());
        assert!(StressScore::new(5).is_ok());
        assert!(StressScore::new(6).is_err());
    }

    #[test]
    fn energy_score_bounds() {
        assert!(EnergyScore::new(0).is_err());
        assert!(EnergyScore::new(10).is_ok());
        assert!(EnergyScore::new(11).is_err());
    }

    #[test]
    fn scores_order_naturally() {
        assert!(MoodScore::new(2).unwrap() < MoodScore::new(7).unwrap());
        assert!(StressScore::new(4).unwrap() > StressScore::new(1).unwrap());
    }

    #[test]
    fn scores_serialize_transparently() {
        let json = serde_json::to_string(&MoodScore::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
    }
}
