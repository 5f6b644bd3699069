//! Uniform time-indexed score projection.
//!
//! Net is intentionally omitted from cells; callers derive it when needed.

use fortunecast_core::types::{DayFacts, FortuneReport, FortuneScores, HeatmapCell, Timeframe};

/// Points a slot's favorable/unfavorable balance shifts its segment.
const SEGMENT_SHIFT: f32 = 4.0;

/// Sub-daily segment labels, paired with pillar slots in canonical order.
const DAY_SEGMENTS: [&str; 4] = ["morning", "afternoon", "evening", "night"];

/// Projects scores into a uniform ordered array at the report's granularity.
pub struct HeatmapProjector;

impl HeatmapProjector {
    /// A daily report's own breakdown: four sub-daily segments, each the
    /// day's overall score shifted by one pillar slot's interaction balance.
    pub fn daily(facts: &DayFacts, scores: &FortuneScores) -> Vec<HeatmapCell> {
        DAY_SEGMENTS
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let (favorable, unfavorable) = facts
                    .slots
                    .iter()
                    .find(|s| s.slot.index() == index)
                    .map(|s| {
                        let favorable = s.interactions.iter().filter(|i| i.favorable).count();
                        let unfavorable = s.interactions.iter().filter(|i| i.unfavorable).count();
                        (favorable as f32, unfavorable as f32)
                    })
                    .unwrap_or((0.0, 0.0));
                HeatmapCell {
                    label: (*label).to_string(),
                    opportunities: (scores.overall.opportunities + favorable * SEGMENT_SHIFT)
                        .clamp(0.0, 100.0),
                    challenges: (scores.overall.challenges + unfavorable * SEGMENT_SHIFT)
                        .clamp(0.0, 100.0),
                }
            })
            .collect()
    }

    /// One cell per child, labeled at the granularity of the target tier.
    pub fn from_children(children: &[FortuneReport], target: Timeframe) -> Vec<HeatmapCell> {
        let format = match target {
            Timeframe::Daily | Timeframe::Monthly => "%Y-%m-%d",
            Timeframe::Yearly => "%Y-%m",
            Timeframe::Chapter => "%Y",
        };
        children
            .iter()
            .map(|child| HeatmapCell {
                label: child.start_date.format(format).to_string(),
                opportunities: child.scores.overall.opportunities,
                challenges: child.scores.overall.challenges,
            })
            .collect()
    }
}
