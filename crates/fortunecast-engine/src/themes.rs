//! Long-range theme mining: recurring (element, interaction kind, slot,
//! favorability) combinations across a report series.

use chrono::Datelike;

use fortunecast_core::types::{FortuneReport, ThemePattern, ThemeSignificance};

/// Occurrence share (percent) that keeps a combination outright.
const SHARE_KEEP_PCT: f32 = 5.0;
/// Density bound for the spread-based keep rule.
const DENSITY_KEEP: f32 = 10.0;
/// Minimum distinct years for the density rule to apply.
const DENSITY_MIN_YEARS: usize = 3;
/// Relaxed share (percent) for combinations carrying a favorability flag.
const FLAGGED_SHARE_PCT: f32 = 3.0;
/// At most this many themes survive ranking.
const THEME_CAP: usize = 8;
/// Significance tiers by share.
const VERY_HIGH_PCT: f32 = 10.0;
const HIGH_PCT: f32 = 5.0;

/// Mines recurring combinations across a long report series.
pub struct ThemeMiner;

impl ThemeMiner {
    /// Tally combinations per unit, keep the statistically interesting
    /// ones, rank by raw frequency, and cap at eight.
    pub fn mine(reports: &[FortuneReport]) -> Vec<ThemePattern> {
        let units = reports.len();
        if units == 0 {
            return Vec::new();
        }

        let mut themes: Vec<ThemePattern> = Vec::new();
        let mut years_per_theme: Vec<Vec<i32>> = Vec::new();

        for report in reports {
            let year = report.start_date.year();
            for element in &report.basis.elements {
                for interaction in &report.basis.interactions {
                    let position = themes.iter().position(|t| {
                        t.element == *element
                            && t.kind == interaction.kind
                            && t.slot == interaction.slot
                            && t.favorable == interaction.favorable
                            && t.unfavorable == interaction.unfavorable
                    });
                    match position {
                        Some(i) => {
                            themes[i].occurrences += 1;
                            if !years_per_theme[i].contains(&year) {
                                years_per_theme[i].push(year);
                            }
                        }
                        None => {
                            themes.push(ThemePattern {
                                element: *element,
                                kind: interaction.kind.clone(),
                                slot: interaction.slot,
                                favorable: interaction.favorable,
                                unfavorable: interaction.unfavorable,
                                occurrences: 1,
                                share_pct: 0.0,
                                spread_years: 0,
                                significance: ThemeSignificance::Medium,
                            });
                            years_per_theme.push(vec![year]);
                        }
                    }
                }
            }
        }

        for (theme, years) in themes.iter_mut().zip(&years_per_theme) {
            theme.share_pct = theme.occurrences as f32 / units as f32 * 100.0;
            theme.spread_years = years.len();
            theme.significance = if theme.share_pct >= VERY_HIGH_PCT {
                ThemeSignificance::VeryHigh
            } else if theme.share_pct >= HIGH_PCT {
                ThemeSignificance::High
            } else {
                ThemeSignificance::Medium
            };
        }

        let mut kept: Vec<ThemePattern> =
            themes.into_iter().filter(|t| keep(t)).collect();
        kept.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        kept.truncate(THEME_CAP);
        kept
    }
}

/// The three keep rules: share, density over spread, or flagged share.
fn keep(theme: &ThemePattern) -> bool {
    if theme.share_pct >= SHARE_KEEP_PCT {
        return true;
    }
    if theme.spread_years >= DENSITY_MIN_YEARS {
        let density = theme.occurrences as f32 / theme.spread_years as f32;
        if density > DENSITY_KEEP {
            return true;
        }
    }
    (theme.favorable || theme.unfavorable) && theme.share_pct >= FLAGGED_SHARE_PCT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::test_support::leaf_report;
    use chrono::NaiveDate;
    use fortunecast_core::types::{BasisInteraction, Element, PillarSlot};

    fn report_with_theme(date: NaiveDate, kind: &str, favorable: bool) -> FortuneReport {
        let mut report = leaf_report(date, 50.0, 50.0);
        report.basis.elements = vec![Element::Wood];
        report.basis.interactions = vec![BasisInteraction {
            slot: PillarSlot::Day,
            kind: kind.to_string(),
            favorable,
            unfavorable: false,
        }];
        report
    }

    fn blank_series(count: usize) -> Vec<FortuneReport> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count)
            .map(|i| leaf_report(start + chrono::Days::new(i as u64), 50.0, 50.0))
            .collect()
    }

    #[test]
    fn test_share_rule_keeps_frequent_combination() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut reports = blank_series(100);
        for i in 0..5 {
            reports[i * 10] = report_with_theme(
                start + chrono::Days::new((i * 10) as u64),
                "direct_wealth",
                false,
            );
        }
        let themes = ThemeMiner::mine(&reports);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].occurrences, 5);
        assert_eq!(themes[0].significance, ThemeSignificance::High);
    }

    #[test]
    fn test_flagged_rule_relaxes_share() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut reports = blank_series(100);
        // 3% share: kept only because the combination is flagged favorable.
        for i in 0..3 {
            reports[i * 20] = report_with_theme(
                start + chrono::Days::new((i * 20) as u64),
                "harmony",
                true,
            );
        }
        let themes = ThemeMiner::mine(&reports);
        assert_eq!(themes.len(), 1);
        assert!(themes[0].favorable);

        // Same share without the flag is dropped.
        let mut unflagged = blank_series(100);
        for i in 0..3 {
            unflagged[i * 20] = report_with_theme(
                start + chrono::Days::new((i * 20) as u64),
                "plain",
                false,
            );
        }
        assert!(ThemeMiner::mine(&unflagged).is_empty());
    }

    #[test]
    fn test_cap_at_eight_by_frequency() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut reports = Vec::new();
        // ten distinct kinds, each on six of sixty units (10% share).
        for k in 0..10 {
            for i in 0..6 {
                reports.push(report_with_theme(
                    start + chrono::Days::new((k * 6 + i) as u64),
                    &format!("kind_{k}"),
                    false,
                ));
            }
        }
        let themes = ThemeMiner::mine(&reports);
        assert_eq!(themes.len(), 8);
        assert!(themes
            .iter()
            .all(|t| t.significance == ThemeSignificance::VeryHigh));
    }

    #[test]
    fn test_empty_series_mines_nothing() {
        assert!(ThemeMiner::mine(&[]).is_empty());
    }
}
