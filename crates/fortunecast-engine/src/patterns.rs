//! Frequency-filtered mining of recurring tagged interactions.

use chrono::Datelike;
use tracing::debug;

use fortunecast_core::types::{
    ConcentrationPhase, FortuneReport, PatternFilterStats, TriggerPattern,
};

/// Default frequency threshold, percent of units.
pub const DEFAULT_THRESHOLD_PCT: f32 = 5.0;

/// Running tally for one interaction kind.
struct Tally {
    kind: String,
    /// Units containing the kind at least once.
    unit_count: usize,
    favorable: usize,
    unfavorable: usize,
    years: Vec<i32>,
    /// Thirds of the series (0, 1, 2) the kind occurred in.
    thirds: [bool; 3],
    /// Last unit index counted, to count each unit once.
    last_unit: Option<usize>,
}

/// Mines interaction kinds that recur often enough to matter.
pub struct TriggerPatternMiner {
    threshold_pct: f32,
}

impl Default for TriggerPatternMiner {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PCT)
    }
}

impl TriggerPatternMiner {
    pub fn new(threshold_pct: f32) -> Self {
        Self { threshold_pct }
    }

    /// Tally interaction kinds across ordered reports and keep those at or
    /// above the frequency threshold. Exactly-at-threshold is retained.
    pub fn mine(&self, reports: &[FortuneReport]) -> (Vec<TriggerPattern>, PatternFilterStats) {
        let units = reports.len();
        let mut tallies: Vec<Tally> = Vec::new();

        for (unit_index, report) in reports.iter().enumerate() {
            let third = series_third(unit_index, units);
            let year = report.start_date.year();
            for interaction in &report.basis.interactions {
                let index = match tallies.iter().position(|t| t.kind == interaction.kind) {
                    Some(index) => index,
                    None => {
                        tallies.push(Tally {
                            kind: interaction.kind.clone(),
                            unit_count: 0,
                            favorable: 0,
                            unfavorable: 0,
                            years: Vec::new(),
                            thirds: [false; 3],
                            last_unit: None,
                        });
                        tallies.len() - 1
                    }
                };
                let tally = &mut tallies[index];
                if tally.last_unit != Some(unit_index) {
                    tally.last_unit = Some(unit_index);
                    tally.unit_count += 1;
                }
                if interaction.favorable {
                    tally.favorable += 1;
                }
                if interaction.unfavorable {
                    tally.unfavorable += 1;
                }
                if !tally.years.contains(&year) {
                    tally.years.push(year);
                }
                tally.thirds[third] = true;
            }
        }

        let required = (self.threshold_pct / 100.0 * units as f32).ceil() as usize;
        let distinct_kinds = tallies.len();

        let mut patterns: Vec<TriggerPattern> = tallies
            .into_iter()
            .filter(|t| t.unit_count >= required)
            .map(|t| TriggerPattern {
                favorable_ratio: favorable_ratio(t.favorable, t.unfavorable),
                concentration: concentration(&t.thirds),
                kind: t.kind,
                occurrences: t.unit_count,
                favorable: t.favorable,
                unfavorable: t.unfavorable,
                spread_years: t.years.len(),
            })
            .collect();
        patterns.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));

        let stats = PatternFilterStats {
            distinct_kinds,
            kept: patterns.len(),
            dropped: distinct_kinds - patterns.len(),
            threshold_pct: self.threshold_pct,
        };
        debug!(
            units,
            distinct = stats.distinct_kinds,
            kept = stats.kept,
            "trigger pattern mining done"
        );
        (patterns, stats)
    }
}

/// Which third of the series an index falls in.
pub(crate) fn series_third(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index * 3 / len).min(2)
}

/// `favorable / (favorable + unfavorable)`, 0.5 when both are zero.
fn favorable_ratio(favorable: usize, unfavorable: usize) -> f32 {
    let total = favorable + unfavorable;
    if total == 0 {
        0.5
    } else {
        favorable as f32 / total as f32
    }
}

fn concentration(thirds: &[bool; 3]) -> ConcentrationPhase {
    match thirds {
        [true, false, false] => ConcentrationPhase::Early,
        [false, true, false] => ConcentrationPhase::Mid,
        [false, false, true] => ConcentrationPhase::Late,
        _ => ConcentrationPhase::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fortunecast_core::types::{BasisInteraction, PillarSlot};
    use crate::aggregator::test_support::leaf_report;

    fn report_with_kinds(date: NaiveDate, kinds: &[(&str, bool, bool)]) -> FortuneReport {
        let mut report = leaf_report(date, 50.0, 50.0);
        report.basis.interactions = kinds
            .iter()
            .map(|(kind, favorable, unfavorable)| BasisInteraction {
                slot: PillarSlot::Day,
                kind: (*kind).to_string(),
                favorable: *favorable,
                unfavorable: *unfavorable,
            })
            .collect();
        report
    }

    fn series(presence: &[bool]) -> Vec<FortuneReport> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        presence
            .iter()
            .enumerate()
            .map(|(i, present)| {
                let date = start + chrono::Days::new(i as u64);
                if *present {
                    report_with_kinds(date, &[("clash", false, true)])
                } else {
                    report_with_kinds(date, &[])
                }
            })
            .collect()
    }

    #[test]
    fn test_exactly_at_threshold_is_retained() {
        // 100 units, present in exactly 5: meets the 5% threshold.
        let mut presence = vec![false; 100];
        for i in [3, 20, 47, 68, 90] {
            presence[i] = true;
        }
        let (patterns, stats) = TriggerPatternMiner::default().mine(&series(&presence));
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].occurrences, 5);
        assert_eq!(stats.kept, 1);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let mut presence = vec![false; 100];
        for i in [3, 20, 47, 68] {
            presence[i] = true;
        }
        let (patterns, stats) = TriggerPatternMiner::default().mine(&series(&presence));
        assert!(patterns.is_empty());
        assert_eq!(stats.distinct_kinds, 1);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_favorable_ratio_zero_denominator_falls_back() {
        assert_eq!(favorable_ratio(0, 0), 0.5);
        assert_eq!(favorable_ratio(3, 1), 0.75);
    }

    #[test]
    fn test_concentration_labels() {
        assert_eq!(concentration(&[true, false, false]), ConcentrationPhase::Early);
        assert_eq!(concentration(&[false, false, true]), ConcentrationPhase::Late);
        assert_eq!(concentration(&[true, true, false]), ConcentrationPhase::All);
    }

    #[test]
    fn test_unit_counted_once_despite_repeats() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let reports = vec![report_with_kinds(
            date,
            &[("harmony", true, false), ("harmony", true, false)],
        )];
        let (patterns, _) = TriggerPatternMiner::new(50.0).mine(&reports);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].occurrences, 1);
        // favorable counts per interaction instance, not per unit.
        assert_eq!(patterns[0].favorable, 2);
    }

    #[test]
    fn test_spread_counts_distinct_years() {
        let reports = vec![
            report_with_kinds(
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                &[("clash", false, true)],
            ),
            report_with_kinds(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                &[("clash", false, true)],
            ),
        ];
        let (patterns, _) = TriggerPatternMiner::new(50.0).mine(&reports);
        assert_eq!(patterns[0].spread_years, 2);
    }
}
