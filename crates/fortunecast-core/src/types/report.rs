//! The report model: immutable multi-scale fortune reports.
//!
//! A `FortuneReport` is created once - from one day's facts at the leaf tier,
//! or from an ordered list of same-tier children at every tier above - and
//! never mutated afterwards. There are no back-references; the model is a
//! strict tree rolled up from leaves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::analysis::{
    AggregationMetadata, HeatmapCell, MarkerWindow, PhaseSummary, SignificantPeriod,
};
use super::facts::{CycleReading, Element, PillarSlot, SpecialMarker};
use super::score::FortuneScores;
use super::symbols::LuckySymbols;

/// The four-level rollup hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Monthly,
    Yearly,
    /// A twenty-year span, the top of the hierarchy.
    Chapter,
}

impl Timeframe {
    /// Returns all tiers from leaf to top.
    pub fn all() -> [Timeframe; 4] {
        [Self::Daily, Self::Monthly, Self::Yearly, Self::Chapter]
    }

    /// The tier one rollup above this one, if any.
    pub fn parent(&self) -> Option<Timeframe> {
        match self {
            Self::Daily => Some(Self::Monthly),
            Self::Monthly => Some(Self::Yearly),
            Self::Yearly => Some(Self::Chapter),
            Self::Chapter => None,
        }
    }

    /// True for tiers whose rollups amplify deviations rather than plainly
    /// averaging (yearly and chapter).
    pub fn amplifies(&self) -> bool {
        matches!(self, Self::Yearly | Self::Chapter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Chapter => "chapter",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened interaction record kept in the factual basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisInteraction {
    pub slot: PillarSlot,
    pub kind: String,
    pub favorable: bool,
    pub unfavorable: bool,
}

/// One detected grand-cycle transition within an aggregated period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTransition {
    pub from: String,
    pub to: String,
    /// Start date of the first unit carrying the new tag.
    pub at: NaiveDate,
    /// Units the new tag held before the next transition or period end.
    pub run_units: usize,
}

/// Snapshot of the facts a report was computed from.
///
/// Leaf reports snapshot their own day; aggregated reports carry the first
/// child's basis plus any detected cycle transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactualBasis {
    pub interactions: Vec<BasisInteraction>,
    pub elements: Vec<Element>,
    pub cycle: CycleReading,
    pub markers: Vec<SpecialMarker>,
    /// Present only when more than one real transition was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_transitions: Option<Vec<CycleTransition>>,
}

/// Computation metadata stamped onto every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub computed_at: DateTime<Utc>,
    /// Leaf units this report ultimately derives from.
    pub source_unit_count: usize,
}

/// An immutable fortune report at one tier of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneReport {
    pub id: Uuid,
    pub timeframe: Timeframe,
    /// Inclusive period bounds.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scores: FortuneScores,
    pub symbols: LuckySymbols,
    /// Special-marker activation windows (aggregated tiers).
    pub marker_windows: Vec<MarkerWindow>,
    /// Volatility and mined patterns; absent on leaf reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationMetadata>,
    /// Exactly three entries, or empty when the period is too short.
    pub phases: Vec<PhaseSummary>,
    pub significant_periods: Vec<SignificantPeriod>,
    pub heatmap: Vec<HeatmapCell>,
    pub basis: FactualBasis,
    pub meta: ReportMeta,
}

impl FortuneReport {
    /// Inclusive day count of the covered period.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chain_terminates_at_chapter() {
        let mut tier = Timeframe::Daily;
        let mut hops = 0;
        while let Some(parent) = tier.parent() {
            tier = parent;
            hops += 1;
        }
        assert_eq!(tier, Timeframe::Chapter);
        assert_eq!(hops, 3);
    }

    #[test]
    fn test_only_yearly_and_chapter_amplify() {
        assert!(!Timeframe::Daily.amplifies());
        assert!(!Timeframe::Monthly.amplifies());
        assert!(Timeframe::Yearly.amplifies());
        assert!(Timeframe::Chapter.amplifies());
    }

    #[test]
    fn test_duration_days_is_inclusive() {
        let report = FortuneReport {
            id: Uuid::new_v4(),
            timeframe: Timeframe::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            scores: FortuneScores::from_categories(|_| {
                crate::types::CategoryScore::neutral()
            }),
            symbols: LuckySymbols::default(),
            marker_windows: vec![],
            aggregation: None,
            phases: vec![],
            significant_periods: vec![],
            heatmap: vec![],
            basis: FactualBasis {
                interactions: vec![],
                elements: vec![],
                cycle: CycleReading::NotStarted,
                markers: vec![],
                cycle_transitions: None,
            },
            meta: ReportMeta {
                computed_at: Utc::now(),
                source_unit_count: 31,
            },
        };
        assert_eq!(report.duration_days(), 31);
    }
}
