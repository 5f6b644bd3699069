//! Scoring configuration: pillar weights, marker bonuses, cycle affinities,
//! and the numeric knobs of the per-day score pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Category, SpecialMarker};

/// Tolerance when validating that a weight row sums to 1.0.
const WEIGHT_SUM_TOLERANCE: f32 = 1e-3;

/// Per-category weights over the four pillar slots.
///
/// Indexed `[category][slot]`; each row sums to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights(pub [[f32; 4]; 5]);

impl PillarWeights {
    /// Weight row for one category, ordered year/month/day/hour.
    pub fn row(&self, category: Category) -> &[f32; 4] {
        &self.0[category.index()]
    }
}

impl Default for PillarWeights {
    fn default() -> Self {
        // year / month / day / hour
        Self([
            [0.15, 0.35, 0.30, 0.20], // career
            [0.20, 0.25, 0.35, 0.20], // wealth
            [0.10, 0.20, 0.40, 0.30], // love
            [0.25, 0.20, 0.30, 0.25], // health
            [0.15, 0.25, 0.25, 0.35], // study
        ])
    }
}

/// Flat bonus granted to one category while a marker is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerBonus {
    pub marker: SpecialMarker,
    pub category: Category,
    pub opportunities: f32,
    pub challenges: f32,
}

/// Grand-cycle tags considered favorable or unfavorable for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleAffinity {
    pub category: Category,
    pub favorable: Vec<String>,
    pub unfavorable: Vec<String>,
}

/// Configuration for the per-day score pipeline.
///
/// Field defaults reproduce the production scoring constants; deployments
/// override the tables, rarely the knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-category pillar-slot weights; each row sums to 1.0.
    pub pillar_weights: PillarWeights,

    /// Points added per weighted interaction.
    pub interaction_weight: f32,

    /// Points added when the grand-cycle tag matches a category affinity.
    pub cycle_weight: f32,

    /// Points per distinct element, up to three.
    pub element_diversity_step: f32,

    /// Flat bonus when any element recurs at least twice.
    pub element_recurrence_bonus: f32,

    /// Scale applied to the total marker bonus when at least
    /// `marker_damping_count` markers are simultaneously present.
    pub marker_damping: f32,
    pub marker_damping_count: usize,

    /// Category-conditioned flat bonuses per active marker.
    pub marker_bonuses: Vec<MarkerBonus>,

    /// Per-category favorable/unfavorable grand-cycle tags.
    pub cycle_affinities: Vec<CycleAffinity>,
}

impl ScoringConfig {
    /// Validate structural invariants (weight rows summing to 1.0).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in Category::all() {
            let sum: f32 = self.pillar_weights.row(category).iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ConfigError::WeightRowSum { category, sum });
            }
        }
        Ok(())
    }

    /// All bonuses a marker grants to one category.
    pub fn marker_bonus(&self, marker: SpecialMarker, category: Category) -> Option<&MarkerBonus> {
        self.marker_bonuses
            .iter()
            .find(|b| b.marker == marker && b.category == category)
    }

    /// Cycle affinity row for one category.
    pub fn cycle_affinity(&self, category: Category) -> Option<&CycleAffinity> {
        self.cycle_affinities.iter().find(|a| a.category == category)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pillar_weights: PillarWeights::default(),
            interaction_weight: 8.0,
            cycle_weight: 5.0,
            element_diversity_step: 3.0,
            element_recurrence_bonus: 6.0,
            marker_damping: 0.75,
            marker_damping_count: 3,
            marker_bonuses: vec![
                MarkerBonus {
                    marker: SpecialMarker::Nobleman,
                    category: Category::Career,
                    opportunities: 8.0,
                    challenges: 0.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::Nobleman,
                    category: Category::Health,
                    opportunities: 4.0,
                    challenges: 0.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::PeachBlossom,
                    category: Category::Love,
                    opportunities: 10.0,
                    challenges: 0.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::TravelHorse,
                    category: Category::Career,
                    opportunities: 6.0,
                    challenges: 0.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::TravelHorse,
                    category: Category::Health,
                    opportunities: 0.0,
                    challenges: 3.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::AcademicStar,
                    category: Category::Study,
                    opportunities: 10.0,
                    challenges: 0.0,
                },
                MarkerBonus {
                    marker: SpecialMarker::GoldenCarriage,
                    category: Category::Wealth,
                    opportunities: 8.0,
                    challenges: 0.0,
                },
            ],
            cycle_affinities: vec![
                CycleAffinity {
                    category: Category::Career,
                    favorable: vec!["wood".into(), "water".into()],
                    unfavorable: vec!["fire".into()],
                },
                CycleAffinity {
                    category: Category::Wealth,
                    favorable: vec!["metal".into(), "earth".into()],
                    unfavorable: vec!["wood".into()],
                },
                CycleAffinity {
                    category: Category::Love,
                    favorable: vec!["fire".into(), "wood".into()],
                    unfavorable: vec!["metal".into()],
                },
                CycleAffinity {
                    category: Category::Health,
                    favorable: vec!["earth".into()],
                    unfavorable: vec!["water".into()],
                },
                CycleAffinity {
                    category: Category::Study,
                    favorable: vec!["water".into(), "metal".into()],
                    unfavorable: vec!["earth".into()],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_weight_row_is_rejected() {
        let mut config = ScoringConfig::default();
        config.pillar_weights.0[0] = [0.5, 0.5, 0.5, 0.5];
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WeightRowSum {
                category: Category::Career,
                ..
            }
        ));
    }

    #[test]
    fn test_marker_bonus_lookup() {
        let config = ScoringConfig::default();
        let bonus = config
            .marker_bonus(SpecialMarker::PeachBlossom, Category::Love)
            .unwrap();
        assert_eq!(bonus.opportunities, 10.0);
        assert!(config
            .marker_bonus(SpecialMarker::PeachBlossom, Category::Wealth)
            .is_none());
    }
}
