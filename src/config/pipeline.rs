//! Pipeline tuning configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tuning knobs for the analysis and delivery pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Days of history a profile build looks back over.
    #[serde(default = "default_profile_window_days")]
    pub profile_window_days: u32,

    /// TTL for cached profiles, in seconds.
    #[serde(default = "default_profile_cache_ttl")]
    pub profile_cache_ttl_secs: u64,

    /// Upper bound on a profile build before degrading, in milliseconds.
    #[serde(default = "default_profile_build_timeout")]
    pub profile_build_timeout_ms: u64,

    /// Items delivered in the targeted (high/medium urgency) tier.
    #[serde(default = "default_targeted_limit")]
    pub targeted_limit: usize,

    /// Items delivered in the routine tier.
    #[serde(default = "default_routine_limit")]
    pub routine_limit: usize,

    /// Recently-interacted exclusion window for routine delivery, days.
    #[serde(default = "default_routine_exclusion_days")]
    pub routine_exclusion_days: u32,

    /// Recently-interacted exclusion window for general
    /// recommendations, days.
    #[serde(default = "default_general_exclusion_days")]
    pub general_exclusion_days: u32,

    /// Entries pulled as recent history for pattern detection.
    #[serde(default = "default_recent_history_limit")]
    pub recent_history_limit: usize,
}

impl PipelineConfig {
    pub fn profile_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_cache_ttl_secs)
    }

    pub fn profile_build_timeout(&self) -> Duration {
        Duration::from_millis(self.profile_build_timeout_ms)
    }

    /// Validate pipeline configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.profile_window_days == 0 {
            return Err(ValidationError::InvalidProfileWindow);
        }
        if self.profile_build_timeout_ms == 0 {
            return Err(ValidationError::InvalidBuildTimeout);
        }
        if self.targeted_limit == 0 || self.routine_limit == 0 {
            return Err(ValidationError::InvalidDeliveryLimit);
        }
        if self.routine_exclusion_days == 0 || self.general_exclusion_days == 0 {
            return Err(ValidationError::InvalidExclusionWindow);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profile_window_days: default_profile_window_days(),
            profile_cache_ttl_secs: default_profile_cache_ttl(),
            profile_build_timeout_ms: default_profile_build_timeout(),
            targeted_limit: default_targeted_limit(),
            routine_limit: default_routine_limit(),
            routine_exclusion_days: default_routine_exclusion_days(),
            general_exclusion_days: default_general_exclusion_days(),
            recent_history_limit: default_recent_history_limit(),
        }
    }
}

fn default_profile_window_days() -> u32 {
    30
}

fn default_profile_cache_ttl() -> u64 {
    300
}

fn default_profile_build_timeout() -> u64 {
    500
}

fn default_targeted_limit() -> usize {
    3
}

fn default_routine_limit() -> usize {
    2
}

fn default_routine_exclusion_days() -> u32 {
    7
}

fn default_general_exclusion_days() -> u32 {
    14
}

fn default_recent_history_limit() -> usize {
    20
}
