//! Three-phase characterization of an aggregated period.
//!
//! A period splits into Early/Mid/Late thirds (Late absorbs the remainder);
//! each phase gets normalized metrics and a qualitative character chosen by
//! a fixed priority ladder.

use fortunecast_core::config::{AggregationConfig, SymbolConfig};
use fortunecast_core::types::{
    CategoryScore, FortuneReport, FortuneScores, PhaseCharacter, PhasePosition, PhaseSummary,
    Timeframe,
};

use crate::symbols::SymbolAggregator;
use crate::volatility::{mean, variance};

/// Both-sides-elevated bound for the volatile character.
const ELEVATED_BOUND: f32 = 70.0;
/// Net variance above which a phase reads as volatile.
const VARIANCE_VOLATILE: f32 = 200.0;
/// Average net bounds for peak / challenging characters.
const NET_PEAK: f32 = 75.0;
const NET_CHALLENGING: f32 = 30.0;
/// Net variance below which a phase reads as stable.
const VARIANCE_STABLE: f32 = 50.0;
/// Long-scale bands applied only at yearly/chapter targets.
const NET_EMERGENCE: f32 = 60.0;
const NET_GROWTH: f32 = 50.0;
const NET_FOUNDATION: f32 = 40.0;

/// Splits a period into three ordered phases with normalized metrics.
pub struct PhaseAnalyzer<'a> {
    symbols: &'a SymbolConfig,
    aggregation: &'a AggregationConfig,
}

impl<'a> PhaseAnalyzer<'a> {
    pub fn new(symbols: &'a SymbolConfig, aggregation: &'a AggregationConfig) -> Self {
        Self {
            symbols,
            aggregation,
        }
    }

    /// Analyze N ordered children. Fewer than three units cannot fill three
    /// phases, so the result is empty.
    pub fn analyze(&self, children: &[FortuneReport], target: Timeframe) -> Vec<PhaseSummary> {
        let n = children.len();
        if n < 3 {
            return Vec::new();
        }
        let phase_size = (n / 3).max(1);
        [
            (PhasePosition::Early, 0, phase_size),
            (PhasePosition::Mid, phase_size, 2 * phase_size),
            (PhasePosition::Late, 2 * phase_size, n),
        ]
        .into_iter()
        .map(|(position, lo, hi)| self.summarize(position, &children[lo..hi], target))
        .collect()
    }

    fn summarize(
        &self,
        position: PhasePosition,
        units: &[FortuneReport],
        target: Timeframe,
    ) -> PhaseSummary {
        let unit_count = units.len();
        let scores = average_scores(units);

        let mut favorable = 0usize;
        let mut unfavorable = 0usize;
        let mut neutral = 0usize;
        for report in units {
            for interaction in &report.basis.interactions {
                if interaction.favorable {
                    favorable += 1;
                } else if interaction.unfavorable {
                    unfavorable += 1;
                } else {
                    neutral += 1;
                }
            }
        }
        let per_unit = |count: usize| count as f32 / unit_count as f32;

        let threshold = self.aggregation.significant_threshold;
        let significant_units = units
            .iter()
            .filter(|r| {
                r.scores.overall.opportunities > threshold
                    || r.scores.overall.challenges > threshold
            })
            .count();

        let nets: Vec<f32> = units.iter().map(|r| r.scores.overall.net).collect();
        let character = characterize(
            mean(&nets),
            variance(&nets),
            scores.overall.opportunities,
            scores.overall.challenges,
            target,
        );

        PhaseSummary {
            position,
            unit_count,
            scores,
            favorable_per_unit: per_unit(favorable),
            unfavorable_per_unit: per_unit(unfavorable),
            neutral_per_unit: per_unit(neutral),
            significant_units,
            significant_ratio: per_unit(significant_units),
            symbols: SymbolAggregator::new(self.symbols).aggregate(units),
            character,
        }
    }
}

/// Plain per-field averages across units, for overall and every category.
pub(crate) fn average_scores(units: &[FortuneReport]) -> FortuneScores {
    let avg = |field: fn(&FortuneScores) -> &CategoryScore| {
        let opportunities = mean(
            &units
                .iter()
                .map(|r| field(&r.scores).opportunities)
                .collect::<Vec<_>>(),
        );
        let challenges = mean(
            &units
                .iter()
                .map(|r| field(&r.scores).challenges)
                .collect::<Vec<_>>(),
        );
        let net = mean(&units.iter().map(|r| field(&r.scores).net).collect::<Vec<_>>());
        CategoryScore::from_parts(opportunities, challenges, net)
    };
    FortuneScores {
        overall: avg(|s| &s.overall),
        career: avg(|s| &s.career),
        wealth: avg(|s| &s.wealth),
        love: avg(|s| &s.love),
        health: avg(|s| &s.health),
        study: avg(|s| &s.study),
    }
}

/// The fixed priority ladder for a phase's qualitative character.
fn characterize(
    avg_net: f32,
    net_variance: f32,
    avg_opportunities: f32,
    avg_challenges: f32,
    target: Timeframe,
) -> PhaseCharacter {
    if avg_opportunities > ELEVATED_BOUND && avg_challenges > ELEVATED_BOUND {
        return PhaseCharacter::Volatile;
    }
    if net_variance > VARIANCE_VOLATILE {
        return PhaseCharacter::Volatile;
    }
    if avg_net > NET_PEAK {
        return PhaseCharacter::Peak;
    }
    if avg_net < NET_CHALLENGING {
        return PhaseCharacter::Challenging;
    }
    if net_variance < VARIANCE_STABLE {
        return PhaseCharacter::Stable;
    }
    if target.amplifies() {
        if avg_net > NET_EMERGENCE {
            return PhaseCharacter::Emergence;
        }
        if avg_net > NET_GROWTH {
            return PhaseCharacter::Growth;
        }
        if avg_net < NET_FOUNDATION {
            return PhaseCharacter::Foundation;
        }
    }
    PhaseCharacter::Moderate
}
