//! Sufficient statistics for a wellbeing metric.

use serde::{Deserialize, Serialize};

/// Mean and population variance for one metric over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    /// Population variance; 0.0 when fewer than two samples exist.
    pub variance: f64,
    pub samples: u32,
}

impl MetricStats {
    /// Computes stats over raw samples; `None` when there are none.
    ///
    /// Absence of a metric is "no evidence", not a zero default, so an
    /// empty sample set produces no stats at all.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = if samples.len() < 2 {
            0.0
        } else {
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n
        };

        Some(Self {
            mean,
            variance,
            samples: samples.len() as u32,
        })
    }
}
