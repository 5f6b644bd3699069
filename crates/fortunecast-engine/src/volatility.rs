//! Dispersion and trend statistics over an ordered score series.

use fortunecast_core::types::{Trend, VolatilityStats};

/// Standard deviation above which a series reads as volatile regardless of
/// direction.
pub const VOLATILE_STD_DEV: f32 = 20.0;

/// Half-to-half mean shift required to call a trend.
pub const TREND_DELTA: f32 = 10.0;

/// Arithmetic mean; 0.0 for an empty slice.
pub(crate) fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population variance; 0.0 for an empty slice.
pub(crate) fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32
}

/// Computes stddev, extremes, quartiles, and trend over a score series.
pub struct VolatilityAnalyzer;

impl VolatilityAnalyzer {
    /// Analyze an ordered series. The contract requires N >= 1; an empty
    /// slice yields zeroed, stable statistics rather than an error so the
    /// pipeline stays total.
    pub fn analyze(series: &[f32]) -> VolatilityStats {
        if series.is_empty() {
            return VolatilityStats {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                lower_quartile: 0.0,
                upper_quartile: 0.0,
                trend: Trend::Stable,
            };
        }

        let n = series.len();
        let mean_value = mean(series);
        let std_dev = variance(series).sqrt();

        let mut sorted = series.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let lower_quartile = sorted[(n as f32 * 0.25).floor() as usize];
        let upper_quartile = sorted[(n as f32 * 0.75).floor() as usize];

        VolatilityStats {
            mean: mean_value,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
            lower_quartile,
            upper_quartile,
            trend: Self::trend(series, std_dev),
        }
    }

    /// Trend classification: dispersion first, then half-to-half movement.
    fn trend(series: &[f32], std_dev: f32) -> Trend {
        if std_dev > VOLATILE_STD_DEV {
            return Trend::Volatile;
        }
        let split = series.len() / 2;
        let (first, second) = series.split_at(split);
        if first.is_empty() {
            return Trend::Stable;
        }
        let diff = mean(second) - mean(first);
        if diff >= TREND_DELTA {
            Trend::Increasing
        } else if diff <= -TREND_DELTA {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_series_is_stable_with_zero_stddev() {
        let series = [55.0; 10];
        let stats = VolatilityAnalyzer::analyze(&series);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.trend, Trend::Stable);
        assert_eq!(stats.min, 55.0);
        assert_eq!(stats.max, 55.0);
    }

    #[test]
    fn test_alternating_series_is_volatile() {
        let series = [80.0, 20.0, 80.0, 20.0, 80.0, 20.0, 80.0, 20.0, 80.0, 20.0];
        let stats = VolatilityAnalyzer::analyze(&series);
        assert!(stats.std_dev > VOLATILE_STD_DEV, "got {}", stats.std_dev);
        assert_eq!(stats.trend, Trend::Volatile);
    }

    #[test]
    fn test_rising_series_is_increasing() {
        let series = [40.0, 42.0, 44.0, 58.0, 60.0, 62.0];
        let stats = VolatilityAnalyzer::analyze(&series);
        assert_eq!(stats.trend, Trend::Increasing);
    }

    #[test]
    fn test_falling_series_is_decreasing() {
        let series = [70.0, 68.0, 66.0, 52.0, 50.0, 48.0];
        let stats = VolatilityAnalyzer::analyze(&series);
        assert_eq!(stats.trend, Trend::Decreasing);
    }

    #[test]
    fn test_odd_length_split_gives_first_half_floor() {
        // N=5: first half gets floor(5/2)=2 items, second gets 3.
        let series = [50.0, 50.0, 62.0, 62.0, 62.0];
        let stats = VolatilityAnalyzer::analyze(&series);
        // second mean 62, first mean 50, diff 12 -> increasing
        assert_eq!(stats.trend, Trend::Increasing);
    }

    #[test]
    fn test_quartile_indices_floor() {
        let series = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let stats = VolatilityAnalyzer::analyze(&series);
        // N=8: floor(2.0)=2 -> 30, floor(6.0)=6 -> 70
        assert_eq!(stats.lower_quartile, 30.0);
        assert_eq!(stats.upper_quartile, 70.0);
    }

    #[test]
    fn test_single_element_series() {
        let stats = VolatilityAnalyzer::analyze(&[42.0]);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.lower_quartile, 42.0);
        assert_eq!(stats.upper_quartile, 42.0);
        assert_eq!(stats.trend, Trend::Stable);
    }
}
