//! Symbol aggregation: per-unit lookup and cross-period ranking.

use fortunecast_core::config::SymbolConfig;
use fortunecast_core::types::{DayFacts, FortuneReport, LuckySymbols, SymbolShare};

/// Ranks and dedupes symbolic outputs, per-unit and across a period.
pub struct SymbolAggregator<'a> {
    config: &'a SymbolConfig,
}

impl<'a> SymbolAggregator<'a> {
    pub fn new(config: &'a SymbolConfig) -> Self {
        Self { config }
    }

    /// Symbols for a single unit: each favorable element tag maps through
    /// the dictionary; duplicates collapse in first-seen order; entries cap
    /// at the configured (5, 3, 2).
    pub fn for_day(&self, facts: &DayFacts) -> LuckySymbols {
        let mut numbers: Vec<u8> = Vec::new();
        let mut colors: Vec<String> = Vec::new();
        let mut directions: Vec<String> = Vec::new();

        for element in &facts.elements {
            if !self.config.is_favorable(*element) {
                continue;
            }
            let Some(entry) = self.config.lookup(*element) else {
                continue;
            };
            push_unique(&mut numbers, &entry.numbers, self.config.number_cap);
            push_unique(&mut colors, &entry.colors, self.config.color_cap);
            push_unique(&mut directions, &entry.directions, self.config.direction_cap);
        }

        LuckySymbols {
            numbers: numbers.into_iter().map(SymbolShare::full).collect(),
            colors: colors.into_iter().map(SymbolShare::full).collect(),
            directions: directions.into_iter().map(SymbolShare::full).collect(),
        }
    }

    /// Rank symbols across N reports by occurrence count, descending, with
    /// first-seen order as the deterministic tie-break.
    pub fn aggregate(&self, reports: &[FortuneReport]) -> LuckySymbols {
        let units = reports.len();
        LuckySymbols {
            numbers: rank(
                reports
                    .iter()
                    .map(|r| r.symbols.numbers.iter().map(|s| s.value).collect()),
                self.config.number_cap,
                units,
            ),
            colors: rank(
                reports
                    .iter()
                    .map(|r| r.symbols.colors.iter().map(|s| s.value.clone()).collect()),
                self.config.color_cap,
                units,
            ),
            directions: rank(
                reports.iter().map(|r| {
                    r.symbols
                        .directions
                        .iter()
                        .map(|s| s.value.clone())
                        .collect()
                }),
                self.config.direction_cap,
                units,
            ),
        }
    }
}

/// Append values not yet present, respecting the cap.
fn push_unique<T: Clone + PartialEq>(target: &mut Vec<T>, source: &[T], cap: usize) {
    for value in source {
        if target.len() >= cap {
            return;
        }
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

/// Count occurrences per value across report symbol sets and expose the
/// top `cap` with their percentage share.
fn rank<T: Clone + PartialEq>(
    per_report: impl Iterator<Item = Vec<T>>,
    cap: usize,
    units: usize,
) -> Vec<SymbolShare<T>> {
    // First-seen order is preserved by the Vec; the stable sort below keeps
    // it as the tie-break.
    let mut counts: Vec<(T, usize)> = Vec::new();
    for values in per_report {
        for value in values {
            match counts.iter().position(|(v, _)| *v == value) {
                Some(index) => counts[index].1 += 1,
                None => counts.push((value, 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(cap)
        .map(|(value, count)| {
            let percentage = if units == 0 {
                0
            } else {
                (count as f32 / units as f32 * 100.0).round() as u8
            };
            SymbolShare::new(value, percentage)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fortunecast_core::types::Element;

    fn facts_with(elements: Vec<Element>) -> DayFacts {
        let mut facts = DayFacts::empty(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        facts.elements = elements;
        facts
    }

    #[test]
    fn test_for_day_maps_and_dedupes() {
        let config = SymbolConfig::default();
        let aggregator = SymbolAggregator::new(&config);
        let symbols =
            aggregator.for_day(&facts_with(vec![Element::Water, Element::Water, Element::Fire]));
        let numbers: Vec<u8> = symbols.numbers.iter().map(|s| s.value).collect();
        // water first (1, 6), then fire (2, 7); duplicates collapsed.
        assert_eq!(numbers, vec![1, 6, 2, 7]);
        assert!(symbols.numbers.iter().all(|s| s.percentage == 100));
        // direction cap is 2: north then south.
        assert_eq!(symbols.directions.len(), 2);
    }

    #[test]
    fn test_for_day_skips_unfavorable_elements() {
        let mut config = SymbolConfig::default();
        config.favorable_elements = vec![Element::Metal];
        let aggregator = SymbolAggregator::new(&config);
        let symbols = aggregator.for_day(&facts_with(vec![Element::Wood, Element::Metal]));
        let numbers: Vec<u8> = symbols.numbers.iter().map(|s| s.value).collect();
        assert_eq!(numbers, vec![4, 9]);
    }

    #[test]
    fn test_number_cap_is_respected() {
        let config = SymbolConfig::default();
        let aggregator = SymbolAggregator::new(&config);
        let symbols = aggregator.for_day(&facts_with(vec![
            Element::Wood,
            Element::Fire,
            Element::Water,
        ]));
        // three elements contribute six candidate numbers, capped at five.
        assert_eq!(symbols.numbers.len(), 5);
    }

    #[test]
    fn test_rank_orders_by_count_then_first_seen() {
        let sets = vec![
            vec![8u8, 3],
            vec![3, 1],
            vec![3, 8],
        ];
        let ranked = rank(sets.into_iter(), 5, 3);
        let values: Vec<u8> = ranked.iter().map(|s| s.value).collect();
        // 3 occurs three times, 8 twice, 1 once.
        assert_eq!(values, vec![3, 8, 1]);
        assert_eq!(ranked[0].percentage, 100);
        assert_eq!(ranked[1].percentage, 67);
        assert_eq!(ranked[2].percentage, 33);
    }
}
