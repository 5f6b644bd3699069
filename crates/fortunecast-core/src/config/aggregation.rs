//! Rollup configuration: amplification factors, clamp bounds, clustering and
//! mining thresholds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for multi-tier rollups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Base deviation amplification at the yearly tier.
    pub yearly_amplification: f32,

    /// Base deviation amplification at the chapter tier.
    pub chapter_amplification: f32,

    /// Extra factor for children whose overall opportunities sit more than
    /// one standard deviation above the cohort mean.
    pub breakthrough_boost: f32,

    /// Damping factor for children more than one standard deviation below.
    pub valley_damping: f32,

    /// `volatility_multiplier = 1 + min(std_dev / divisor, cap)`.
    pub volatility_divisor: f32,
    pub volatility_cap: f32,

    /// Clamp bounds for amplified values. Wider than the leaf [0, 100] on
    /// purpose; the asymmetry is part of the aggregate-tier contract.
    pub amplified_min: f32,
    pub amplified_max: f32,

    /// Minimum run length for a marker activation window, in units.
    pub marker_window_min_units: usize,

    /// Minimum sustained run for a significant-score window, in units.
    pub significant_min_units: usize,

    /// Score above which a unit counts as significant.
    pub significant_threshold: f32,

    /// Score above which a single isolated unit forms a window on its own,
    /// bypassing the minimum-run filter.
    pub spike_threshold: f32,

    /// Default trigger-pattern frequency threshold, percent of units.
    pub pattern_threshold_pct: f32,

    /// Grand-cycle segments shorter than this many units are dropped as
    /// noise. Configurable because it is an open question whether a short
    /// segment is noise or a real short cycle.
    pub min_cycle_run: usize,
}

impl AggregationConfig {
    /// Validate bound ordering and threshold ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amplified_min > self.amplified_max {
            return Err(ConfigError::InvertedClamp {
                min: self.amplified_min,
                max: self.amplified_max,
            });
        }
        if self.pattern_threshold_pct <= 0.0 || self.pattern_threshold_pct > 100.0 {
            return Err(ConfigError::BadThreshold {
                pct: self.pattern_threshold_pct,
            });
        }
        Ok(())
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            yearly_amplification: 1.2,
            chapter_amplification: 1.35,
            breakthrough_boost: 1.5,
            valley_damping: 0.7,
            volatility_divisor: 25.0,
            volatility_cap: 0.4,
            amplified_min: 40.0,
            amplified_max: 110.0,
            marker_window_min_units: 7,
            significant_min_units: 2,
            significant_threshold: 75.0,
            spike_threshold: 85.0,
            pattern_threshold_pct: 5.0,
            min_cycle_run: 180,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(AggregationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_clamp_rejected() {
        let config = AggregationConfig {
            amplified_min: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedClamp { .. })
        ));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = AggregationConfig {
            pattern_threshold_pct: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadThreshold { .. })
        ));
    }
}
