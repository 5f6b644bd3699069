//! Per-day category scoring.
//!
//! Every category starts at a neutral 50/50 and accumulates four bonus
//! layers: element diversity, cycle timing, weighted interactions, and
//! special markers. Clamping is silent; the pipeline never fails on an
//! out-of-range intermediate value.

use fortunecast_core::config::ScoringConfig;
use fortunecast_core::types::{
    Category, CategoryScore, DayFacts, Element, FortuneScores, NEUTRAL_MIDPOINT,
};

/// Distinct elements counted toward the diversity bonus, at most.
const ELEMENT_DIVERSITY_CAP: usize = 3;

/// Converts one day's facts into category scores.
///
/// Pure: identical input produces identical output, always.
pub struct ScoreCalculator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Score all five categories plus the derived overall.
    pub fn score(&self, facts: &DayFacts) -> FortuneScores {
        let element_bonus = self.element_bonus(&facts.elements);
        FortuneScores::from_categories(|category| {
            self.score_category(category, facts, element_bonus)
        })
    }

    /// Element bonus, shared by every category: diversity plus a flat
    /// recurrence bonus when any element appears at least twice.
    fn element_bonus(&self, elements: &[Element]) -> f32 {
        let mut distinct: Vec<Element> = Vec::with_capacity(elements.len());
        let mut recurring = false;
        for element in elements {
            if distinct.contains(element) {
                recurring = true;
            } else {
                distinct.push(*element);
            }
        }
        let diversity =
            distinct.len().min(ELEMENT_DIVERSITY_CAP) as f32 * self.config.element_diversity_step;
        if recurring {
            diversity + self.config.element_recurrence_bonus
        } else {
            diversity
        }
    }

    fn score_category(
        &self,
        category: Category,
        facts: &DayFacts,
        element_bonus: f32,
    ) -> CategoryScore {
        let mut opportunities = NEUTRAL_MIDPOINT + element_bonus;
        let mut challenges = NEUTRAL_MIDPOINT;

        // Cycle timing: the slow-moving grand-cycle tag against the
        // category's affinity lists.
        if let (Some(tag), Some(affinity)) =
            (&facts.cycle, self.config.cycle_affinity(category))
        {
            if affinity.favorable.iter().any(|t| t == tag) {
                opportunities += self.config.cycle_weight;
            }
            if affinity.unfavorable.iter().any(|t| t == tag) {
                challenges += self.config.cycle_weight;
            }
        }

        // Weighted interactions per pillar slot.
        let weights = self.config.pillar_weights.row(category);
        for slot in &facts.slots {
            let weight = weights[slot.slot.index()] * self.config.interaction_weight;
            for interaction in &slot.interactions {
                if interaction.favorable {
                    opportunities += weight;
                }
                if interaction.unfavorable {
                    challenges += weight;
                }
            }
        }

        // Marker bonuses, damped when many markers stack up.
        let mut marker_opportunities = 0.0;
        let mut marker_challenges = 0.0;
        for marker in &facts.markers {
            if let Some(bonus) = self.config.marker_bonus(*marker, category) {
                marker_opportunities += bonus.opportunities;
                marker_challenges += bonus.challenges;
            }
        }
        if facts.markers.len() >= self.config.marker_damping_count {
            marker_opportunities *= self.config.marker_damping;
            marker_challenges *= self.config.marker_damping;
        }
        opportunities += marker_opportunities;
        challenges += marker_challenges;

        CategoryScore::from_raw(opportunities, challenges)
    }
}
