//! Entry version value object and the conflict rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing version of a wellbeing entry.
///
/// Versions start at 1 and only ever grow. A device mutation whose claimed
/// version does not strictly exceed the stored version is a conflict; the
/// device resolves it and re-submits with a fresh, higher version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryVersion(u32);

impl EntryVersion {
    /// Creates the initial version (1).
    pub fn initial() -> Self {
        Self(1)
    }

    /// Creates a version from a raw value, rejecting zero.
    pub fn from_u32(value: u32) -> Result<Self, &'static str> {
        if value == 0 {
            Err("Entry version must be greater than 0")
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the inner value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Checks whether a claimed version would be accepted as an update.
    pub fn accepts(&self, claimed: EntryVersion) -> bool {
        claimed.0 > self.0
    }

    /// Computes the next stored version for an accepted update.
    ///
    /// The rule is `max(stored + 1, claimed)`: the result always strictly
    /// exceeds the stored version, and a device that deliberately jumped
    /// ahead keeps its claimed number so its local copy stays convergent.
    pub fn advance(&self, claimed: EntryVersion) -> Self {
        Self((self.0 + 1).max(claimed.0))
    }
}

impl Default for EntryVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for EntryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
