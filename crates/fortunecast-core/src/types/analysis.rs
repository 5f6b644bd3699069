//! Statistical metadata types attached to aggregated reports: volatility,
//! mined trigger patterns, phase summaries, clustered windows, heatmap cells,
//! and mined themes.
//!
//! These are plain data carriers; the computations that fill them live in
//! `fortunecast-engine`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::facts::{Element, PillarSlot, SpecialMarker};
use super::score::{Category, FortuneScores};
use super::symbols::LuckySymbols;

/// Direction of a net-score series over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Second half meaningfully above the first.
    Increasing,
    /// Second half meaningfully below the first.
    Decreasing,
    /// No meaningful movement between halves.
    Stable,
    /// Dispersion too high for halves to mean anything.
    Volatile,
}

/// Dispersion and trend statistics over an ordered score series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityStats {
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    /// `sorted[floor(N * 0.25)]`.
    pub lower_quartile: f32,
    /// `sorted[floor(N * 0.75)]`.
    pub upper_quartile: f32,
    pub trend: Trend,
}

/// Which third(s) of a series a mined pattern concentrates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationPhase {
    Early,
    Mid,
    Late,
    /// Spread across more than one third.
    All,
}

/// A recurring interaction kind that survived frequency filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPattern {
    /// Interaction kind tag.
    pub kind: String,
    /// Units in which the kind occurred at least once.
    pub occurrences: usize,
    /// Units where an occurrence involved a favorable element.
    pub favorable: usize,
    /// Units where an occurrence involved an unfavorable element.
    pub unfavorable: usize,
    /// `favorable / (favorable + unfavorable)`, 0.5 when both are zero.
    pub favorable_ratio: f32,
    /// Distinct calendar years the kind occurred in.
    pub spread_years: usize,
    pub concentration: ConcentrationPhase,
}

/// Filtering statistics emitted alongside mined patterns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternFilterStats {
    /// Distinct interaction kinds seen before filtering.
    pub distinct_kinds: usize,
    pub kept: usize,
    pub dropped: usize,
    /// Frequency threshold applied, in percent of units.
    pub threshold_pct: f32,
}

/// Volatility, mined trigger patterns, and filtering statistics for a rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationMetadata {
    pub volatility: VolatilityStats,
    pub patterns: Vec<TriggerPattern>,
    pub filter: PatternFilterStats,
}

/// Position of a phase (or window) within its parent period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePosition {
    Early,
    Mid,
    Late,
}

impl fmt::Display for PhasePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        })
    }
}

/// Qualitative character of a phase, chosen by a fixed priority ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCharacter {
    /// Both sides elevated, or net variance beyond the volatile bound.
    Volatile,
    Peak,
    Challenging,
    Stable,
    /// Yearly/chapter scale only: net clearly above the growth band.
    Emergence,
    /// Yearly/chapter scale only: net in the growth band.
    Growth,
    /// Yearly/chapter scale only: net below the foundation bound.
    Foundation,
    Moderate,
}

/// Normalized metrics for one third of an aggregated period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub position: PhasePosition,
    pub unit_count: usize,
    /// Plain-averaged scores across the phase's units.
    pub scores: FortuneScores,
    pub favorable_per_unit: f32,
    pub unfavorable_per_unit: f32,
    pub neutral_per_unit: f32,
    /// Units with overall opportunities or challenges above the significance
    /// threshold.
    pub significant_units: usize,
    pub significant_ratio: f32,
    /// Deduplicated symbol union across the phase.
    pub symbols: LuckySymbols,
    pub character: PhaseCharacter,
}

/// A consecutive run of units where one special marker stayed active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerWindow {
    pub marker: SpecialMarker,
    /// Inclusive bounds.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub member_count: usize,
    /// Third of the parent period the window starts in.
    pub position: PhasePosition,
}

/// Flavor of a significant-score window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Only opportunities crossed the threshold.
    Peak,
    /// Only challenges crossed the threshold.
    Challenging,
    /// Both sides crossed it somewhere in the window.
    Volatile,
}

/// A sustained run of significant scores at child granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantPeriod {
    pub kind: WindowKind,
    /// Inclusive bounds.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub member_count: usize,
    /// Category with the highest average net across the window.
    pub dominant: Category,
}

/// One cell of the uniform time-indexed score projection.
///
/// Net is omitted on purpose; callers derive it when they need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub label: String,
    pub opportunities: f32,
    pub challenges: f32,
}

/// Significance tier of a mined theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSignificance {
    /// Occurrence share at or above 10%.
    VeryHigh,
    /// Share at or above 5%.
    High,
    Medium,
}

/// A recurring (element, interaction kind, slot, favorability) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePattern {
    pub element: Element,
    pub kind: String,
    pub slot: PillarSlot,
    pub favorable: bool,
    pub unfavorable: bool,
    pub occurrences: usize,
    /// Occurrence share across the mined series, in percent.
    pub share_pct: f32,
    /// Distinct calendar years the combination spans.
    pub spread_years: usize,
    pub significance: ThemeSignificance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_serde_round_trip() {
        for trend in [
            Trend::Increasing,
            Trend::Decreasing,
            Trend::Stable,
            Trend::Volatile,
        ] {
            let json = serde_json::to_string(&trend).unwrap();
            let back: Trend = serde_json::from_str(&json).unwrap();
            assert_eq!(trend, back);
        }
    }

    #[test]
    fn test_window_kind_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&WindowKind::Challenging).unwrap(),
            "\"challenging\""
        );
    }
}
