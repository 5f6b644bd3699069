//! The report aggregator: leaf report construction and multi-tier rollups.
//!
//! Rolling up averages child scores, but yearly and chapter tiers apply
//! variance-preserving amplification so a breakthrough year is not flattened
//! into the cohort mean. Each child's deviation from the cohort mean is
//! scaled by its breakthrough/valley-adjusted factor before averaging back;
//! with identical children every deviation is zero and the rollup is an
//! exact no-op regardless of factors.

mod cycle;

use chrono::{Datelike, Months, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use fortunecast_core::config::{AggregationConfig, ScoringConfig, SymbolConfig};
use fortunecast_core::error::{FortunecastError, Result};
use fortunecast_core::types::{
    AggregationMetadata, BasisInteraction, Category, CategoryScore, CycleReading, DayFacts,
    FactualBasis, FortuneReport, FortuneScores, MarkerWindow, PhasePosition, ReportMeta,
    SignificantPeriod, SpecialMarker, Timeframe, WindowKind,
};

use crate::clusterer::PeriodClusterer;
use crate::heatmap::HeatmapProjector;
use crate::patterns::{series_third, TriggerPatternMiner};
use crate::phases::{average_scores, PhaseAnalyzer};
use crate::scoring::ScoreCalculator;
use crate::symbols::SymbolAggregator;
use crate::volatility::{mean, VolatilityAnalyzer};

/// Orchestrates leaf report construction and rollups up to the chapter tier.
pub struct ReportAggregator {
    scoring: ScoringConfig,
    symbols: SymbolConfig,
    aggregation: AggregationConfig,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            symbols: SymbolConfig::default(),
            aggregation: AggregationConfig::default(),
        }
    }
}

impl ReportAggregator {
    /// Build an aggregator from validated configuration.
    pub fn new(
        scoring: ScoringConfig,
        symbols: SymbolConfig,
        aggregation: AggregationConfig,
    ) -> Result<Self> {
        scoring.validate()?;
        aggregation.validate()?;
        Ok(Self {
            scoring,
            symbols,
            aggregation,
        })
    }

    /// Create the leaf report for one day's facts.
    pub fn daily_report(&self, facts: &DayFacts) -> FortuneReport {
        let scores = ScoreCalculator::new(&self.scoring).score(facts);
        let symbols = SymbolAggregator::new(&self.symbols).for_day(facts);
        let heatmap = HeatmapProjector::daily(facts, &scores);

        FortuneReport {
            id: Uuid::new_v4(),
            timeframe: Timeframe::Daily,
            start_date: facts.date,
            end_date: facts.date,
            scores,
            symbols,
            marker_windows: Vec::new(),
            aggregation: None,
            phases: Vec::new(),
            significant_periods: Vec::new(),
            heatmap,
            basis: FactualBasis {
                interactions: facts
                    .all_interactions()
                    .map(|(slot, i)| BasisInteraction {
                        slot,
                        kind: i.kind.clone(),
                        favorable: i.favorable,
                        unfavorable: i.unfavorable,
                    })
                    .collect(),
                elements: facts.elements.clone(),
                cycle: match &facts.cycle {
                    Some(tag) => CycleReading::Active(tag.clone()),
                    None => CycleReading::NotStarted,
                },
                markers: facts.markers.clone(),
                cycle_transitions: None,
            },
            meta: ReportMeta {
                computed_at: Utc::now(),
                source_unit_count: 1,
            },
        }
    }

    /// Roll N same-tier children into one parent report at `target`.
    pub fn roll_up(&self, children: &[FortuneReport], target: Timeframe) -> Result<FortuneReport> {
        self.check_children(children, target)?;
        let n = children.len();
        debug!(children = n, tier = %target, "rolling up");

        let scores = if target.amplifies() {
            self.amplified_scores(children, target)
        } else {
            average_scores(children)
        };

        let nets: Vec<f32> = children.iter().map(|r| r.scores.overall.net).collect();
        let volatility = VolatilityAnalyzer::analyze(&nets);
        let (patterns, filter) =
            TriggerPatternMiner::new(self.aggregation.pattern_threshold_pct).mine(children);

        let mut basis = children[0].basis.clone();
        basis.cycle_transitions =
            cycle::detect_transitions(children, self.aggregation.min_cycle_run);

        Ok(FortuneReport {
            id: Uuid::new_v4(),
            timeframe: target,
            start_date: children[0].start_date,
            end_date: children[n - 1].end_date,
            scores,
            symbols: SymbolAggregator::new(&self.symbols).aggregate(children),
            marker_windows: self.marker_windows(children),
            aggregation: Some(AggregationMetadata {
                volatility,
                patterns,
                filter,
            }),
            phases: PhaseAnalyzer::new(&self.symbols, &self.aggregation)
                .analyze(children, target),
            significant_periods: self.significant_periods(children),
            heatmap: HeatmapProjector::from_children(children, target),
            basis,
            meta: ReportMeta {
                computed_at: Utc::now(),
                source_unit_count: children.iter().map(|r| r.meta.source_unit_count).sum(),
            },
        })
    }

    /// Chapter rollup straight from daily leaves: group into year-length
    /// windows anchored at `anchor`, synthesize a yearly report per window,
    /// then roll the years into one chapter.
    pub fn chapter_from_daily(
        &self,
        days: &[FortuneReport],
        anchor: NaiveDate,
    ) -> Result<FortuneReport> {
        if days.is_empty() {
            return Err(FortunecastError::EmptyRollup {
                target: Timeframe::Chapter,
            });
        }

        let mut yearlies = Vec::new();
        let mut start = 0usize;
        let mut current = window_index(anchor, days[0].start_date);
        for i in 1..=days.len() {
            let index = days
                .get(i)
                .map(|d| window_index(anchor, d.start_date));
            if i == days.len() || index != Some(current) {
                yearlies.push(self.roll_up(&days[start..i], Timeframe::Yearly)?);
                if let Some(index) = index {
                    start = i;
                    current = index;
                }
            }
        }
        debug!(years = yearlies.len(), "synthesized yearly sub-reports");
        self.roll_up(&yearlies, Timeframe::Chapter)
    }

    fn check_children(&self, children: &[FortuneReport], target: Timeframe) -> Result<()> {
        let Some(first) = children.first() else {
            return Err(FortunecastError::EmptyRollup { target });
        };
        let expected = first.timeframe;
        if let Some(mixed) = children.iter().find(|c| c.timeframe != expected) {
            return Err(FortunecastError::MixedTimeframes {
                expected,
                found: mixed.timeframe,
            });
        }
        // Children must sit strictly below the target; a chapter may roll up
        // from daily leaves, so adjacency is not required.
        if tier_rank(expected) >= tier_rank(target) {
            return Err(FortunecastError::TierMismatch {
                child: expected,
                target,
            });
        }
        Ok(())
    }

    /// Variance-preserving amplification for yearly and chapter targets.
    ///
    /// Breakthrough/valley classification and the volatility multiplier come
    /// from the children's overall-opportunities series once, and apply to
    /// every category.
    fn amplified_scores(&self, children: &[FortuneReport], target: Timeframe) -> FortuneScores {
        let cfg = &self.aggregation;
        let overall_opp: Vec<f32> = children
            .iter()
            .map(|r| r.scores.overall.opportunities)
            .collect();
        let stats = VolatilityAnalyzer::analyze(&overall_opp);
        let base = match target {
            Timeframe::Chapter => cfg.chapter_amplification,
            _ => cfg.yearly_amplification,
        };
        let volatility_multiplier =
            1.0 + (stats.std_dev / cfg.volatility_divisor).min(cfg.volatility_cap);

        let factors: Vec<f32> = overall_opp
            .iter()
            .map(|value| {
                if *value > stats.mean + stats.std_dev {
                    base * cfg.breakthrough_boost
                } else if *value < stats.mean - stats.std_dev {
                    base * cfg.valley_damping
                } else {
                    base
                }
            })
            .collect();

        let amplify = |values: Vec<f32>| -> f32 {
            let child_mean = mean(&values);
            let amplified_deviation = values
                .iter()
                .zip(&factors)
                .map(|(value, factor)| (value - child_mean) * factor)
                .sum::<f32>()
                / values.len() as f32;
            (child_mean + amplified_deviation * volatility_multiplier)
                .clamp(cfg.amplified_min, cfg.amplified_max)
        };

        let score_for = |extract: fn(&FortuneScores) -> &CategoryScore| {
            let opportunities = amplify(
                children
                    .iter()
                    .map(|r| extract(&r.scores).opportunities)
                    .collect(),
            );
            let challenges = amplify(
                children
                    .iter()
                    .map(|r| extract(&r.scores).challenges)
                    .collect(),
            );
            // Net at amplified tiers is the raw difference, unclamped.
            CategoryScore::from_parts(opportunities, challenges, opportunities - challenges)
        };

        FortuneScores {
            overall: score_for(|s| &s.overall),
            career: score_for(|s| &s.career),
            wealth: score_for(|s| &s.wealth),
            love: score_for(|s| &s.love),
            health: score_for(|s| &s.health),
            study: score_for(|s| &s.study),
        }
    }

    /// Per-marker activation windows at or above the minimum run length,
    /// tagged with the third of the period they start in.
    fn marker_windows(&self, children: &[FortuneReport]) -> Vec<MarkerWindow> {
        let n = children.len();
        let mut windows = Vec::new();
        for marker in SpecialMarker::all() {
            for run in
                PeriodClusterer::runs(children, |r| r.basis.markers.contains(&marker))
            {
                if run.member_count() < self.aggregation.marker_window_min_units {
                    continue;
                }
                windows.push(MarkerWindow {
                    marker,
                    start: children[run.start_index].start_date,
                    end: children[run.end_index].end_date,
                    member_count: run.member_count(),
                    position: phase_position(run.start_index, n),
                });
            }
        }
        windows
    }

    /// Sustained significant-score windows at child granularity. A single
    /// isolated unit still forms a window when it clears the spike bound.
    fn significant_periods(&self, children: &[FortuneReport]) -> Vec<SignificantPeriod> {
        let cfg = &self.aggregation;
        let threshold = cfg.significant_threshold;
        let mut periods = Vec::new();
        for run in PeriodClusterer::runs(children, |r| {
            r.scores.overall.opportunities > threshold || r.scores.overall.challenges > threshold
        }) {
            let members = &children[run.start_index..=run.end_index];
            if run.member_count() < cfg.significant_min_units {
                let spikes = members.iter().any(|r| {
                    r.scores.overall.opportunities > cfg.spike_threshold
                        || r.scores.overall.challenges > cfg.spike_threshold
                });
                if !spikes {
                    continue;
                }
            }
            let has_opportunities = members
                .iter()
                .any(|r| r.scores.overall.opportunities > threshold);
            let has_challenges = members
                .iter()
                .any(|r| r.scores.overall.challenges > threshold);
            let kind = match (has_opportunities, has_challenges) {
                (true, false) => WindowKind::Peak,
                (false, true) => WindowKind::Challenging,
                _ => WindowKind::Volatile,
            };

            // Dominant category: highest average net across the window,
            // first category winning ties.
            let mut dominant = Category::Career;
            let mut best = f32::MIN;
            for category in Category::all() {
                let avg = mean(
                    &members
                        .iter()
                        .map(|r| r.scores.get(category).net)
                        .collect::<Vec<_>>(),
                );
                if avg > best {
                    best = avg;
                    dominant = category;
                }
            }

            periods.push(SignificantPeriod {
                kind,
                start: children[run.start_index].start_date,
                end: children[run.end_index].end_date,
                member_count: run.member_count(),
                dominant,
            });
        }
        periods
    }
}

/// Early/Mid/Late from an index's third of the series.
fn phase_position(index: usize, len: usize) -> PhasePosition {
    match series_third(index, len) {
        0 => PhasePosition::Early,
        1 => PhasePosition::Mid,
        _ => PhasePosition::Late,
    }
}

fn tier_rank(tier: Timeframe) -> u8 {
    match tier {
        Timeframe::Daily => 0,
        Timeframe::Monthly => 1,
        Timeframe::Yearly => 2,
        Timeframe::Chapter => 3,
    }
}

/// Index of the anchored year-length window containing `date`.
fn window_index(anchor: NaiveDate, date: NaiveDate) -> i32 {
    let mut index = date.year() - anchor.year();
    while date < add_years(anchor, index) {
        index -= 1;
    }
    while date >= add_years(anchor, index + 1) {
        index += 1;
    }
    index
}

fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(12 * years.unsigned_abs());
    if years >= 0 {
        date.checked_add_months(months).unwrap_or(date)
    } else {
        date.checked_sub_months(months).unwrap_or(date)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared builders for engine unit tests.

    use chrono::{Days, NaiveDate, Utc};
    use uuid::Uuid;

    use fortunecast_core::types::{
        CategoryScore, CycleReading, FactualBasis, FortuneReport, FortuneScores, LuckySymbols,
        ReportMeta, Timeframe,
    };

    /// Minimal daily leaf with uniform scores across every category.
    pub(crate) fn leaf_report(
        date: NaiveDate,
        opportunities: f32,
        challenges: f32,
    ) -> FortuneReport {
        let score = CategoryScore::from_raw(opportunities, challenges);
        FortuneReport {
            id: Uuid::new_v4(),
            timeframe: Timeframe::Daily,
            start_date: date,
            end_date: date,
            scores: FortuneScores::from_categories(|_| score),
            symbols: LuckySymbols::default(),
            marker_windows: Vec::new(),
            aggregation: None,
            phases: Vec::new(),
            significant_periods: Vec::new(),
            heatmap: Vec::new(),
            basis: FactualBasis {
                interactions: Vec::new(),
                elements: Vec::new(),
                cycle: CycleReading::NotStarted,
                markers: Vec::new(),
                cycle_transitions: None,
            },
            meta: ReportMeta {
                computed_at: Utc::now(),
                source_unit_count: 1,
            },
        }
    }

    /// Consecutive daily leaves starting at 2024-01-01.
    pub(crate) fn leaf_series(count: usize, opportunities: f32, challenges: f32) -> Vec<FortuneReport> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count)
            .map(|i| leaf_report(start + Days::new(i as u64), opportunities, challenges))
            .collect()
    }
}
