//! Per-day factual inputs: pillar interactions, element tags, grand-cycle
//! state, and special-marker flags.
//!
//! `DayFacts` is the engine's only input shape. Extraction from the
//! astrological calculation library happens upstream; by the time facts reach
//! this crate they are validated and every date is a real `NaiveDate`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FortunecastError, Result};

/// The five classical elements tagged on a day's pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Returns all element variants as a fixed-size array.
    pub fn all() -> [Element; 5] {
        [
            Self::Wood,
            Self::Fire,
            Self::Earth,
            Self::Metal,
            Self::Water,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four pillar positions acting as life-area slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarSlot {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarSlot {
    /// Returns all slot variants in canonical order.
    pub fn all() -> [PillarSlot; 4] {
        [Self::Year, Self::Month, Self::Day, Self::Hour]
    }

    /// Stable index into per-slot weight rows.
    pub fn index(&self) -> usize {
        match self {
            Self::Year => 0,
            Self::Month => 1,
            Self::Day => 2,
            Self::Hour => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

impl fmt::Display for PillarSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Favorability of a single interaction relative to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Favorability {
    Favorable,
    Unfavorable,
    Neutral,
}

/// One tagged interaction between the day's pillars and the natal chart.
///
/// The `kind` tag (a ten-god or clash name) is opaque to the engine; mining
/// and scoring treat it as an identifier so the domain dictionaries stay
/// configuration, not code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction kind tag, e.g. a ten-god or clash name.
    pub kind: String,
    /// Which chart element produced the interaction.
    pub source: String,
    /// Involves one of the chart's favorable elements.
    pub favorable: bool,
    /// Involves one of the chart's unfavorable elements.
    pub unfavorable: bool,
    /// Related tags carried through for the narrative layer.
    pub related: Vec<String>,
}

impl Interaction {
    /// Collapse the two flags into a single favorability reading.
    /// A simultaneously favorable and unfavorable interaction reads as
    /// favorable; scoring still counts it on both sides.
    pub fn favorability(&self) -> Favorability {
        if self.favorable {
            Favorability::Favorable
        } else if self.unfavorable {
            Favorability::Unfavorable
        } else {
            Favorability::Neutral
        }
    }
}

/// Rare presence flags clustered into activation windows at rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMarker {
    /// Helpful-person star; favors career matters.
    Nobleman,
    /// Attraction star; favors love matters.
    PeachBlossom,
    /// Movement star; favors career change, unsettles health.
    TravelHorse,
    /// Scholarship star; favors study matters.
    AcademicStar,
    /// Affluence star; favors wealth matters.
    GoldenCarriage,
}

impl SpecialMarker {
    /// Returns all marker variants as a fixed-size array.
    pub fn all() -> [SpecialMarker; 5] {
        [
            Self::Nobleman,
            Self::PeachBlossom,
            Self::TravelHorse,
            Self::AcademicStar,
            Self::GoldenCarriage,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nobleman => "nobleman",
            Self::PeachBlossom => "peach_blossom",
            Self::TravelHorse => "travel_horse",
            Self::AcademicStar => "academic_star",
            Self::GoldenCarriage => "golden_carriage",
        }
    }
}

impl fmt::Display for SpecialMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grand-cycle state on a single unit after gap classification.
///
/// The raw input is a nullable tag; a missing tag means two different things
/// depending on history, and transition detection must not confuse them:
///
/// - `NotStarted`: no tag has been seen yet - genuinely no active cycle.
/// - `Gap`: the tag is missing but one was seen earlier - a transient data
///   gap that is forward-filled, never a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "tag")]
pub enum CycleReading {
    /// A cycle tag was present on this unit.
    Active(String),
    /// No tag present and none seen before.
    NotStarted,
    /// No tag present but one was seen earlier; treated as the prior tag.
    Gap,
}

impl CycleReading {
    /// The tag carried by an `Active` reading.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Active(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Interactions attached to one pillar slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInteractions {
    pub slot: PillarSlot,
    pub interactions: Vec<Interaction>,
}

/// One day's extracted facts: the engine's sole input shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayFacts {
    /// Civil date of the unit.
    pub date: NaiveDate,
    /// Up to four pillar slots with their tagged interactions.
    pub slots: Vec<SlotInteractions>,
    /// Up to three temporal element tags.
    pub elements: Vec<Element>,
    /// Raw grand-cycle tag; `None` is classified during scans.
    pub cycle: Option<String>,
    /// Special markers present on this day.
    pub markers: Vec<SpecialMarker>,
}

impl DayFacts {
    /// Facts for a date with nothing active; a convenient starting point.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            slots: Vec::new(),
            elements: Vec::new(),
            cycle: None,
            markers: Vec::new(),
        }
    }

    /// Parse an ISO-8601 date as received from the extraction layer.
    ///
    /// Rejecting bad dates here keeps duration arithmetic downstream total.
    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| FortunecastError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    /// Iterate every interaction with its slot.
    pub fn all_interactions(&self) -> impl Iterator<Item = (PillarSlot, &Interaction)> {
        self.slots
            .iter()
            .flat_map(|s| s.interactions.iter().map(move |i| (s.slot, i)))
    }

    pub fn has_marker(&self, marker: SpecialMarker) -> bool {
        self.markers.contains(&marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso() {
        let date = DayFacts::parse_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in ["2024-13-01", "2024-02-30", "not-a-date", ""] {
            let err = DayFacts::parse_date(bad).unwrap_err();
            assert!(
                matches!(err, FortunecastError::InvalidDate { .. }),
                "expected InvalidDate for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_favorability_collapse() {
        let mut i = Interaction {
            kind: "direct_wealth".into(),
            source: "day_stem".into(),
            favorable: false,
            unfavorable: false,
            related: vec![],
        };
        assert_eq!(i.favorability(), Favorability::Neutral);
        i.unfavorable = true;
        assert_eq!(i.favorability(), Favorability::Unfavorable);
        i.favorable = true;
        assert_eq!(i.favorability(), Favorability::Favorable);
    }

    #[test]
    fn test_all_interactions_flattens_slots() {
        let mut facts = DayFacts::empty(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        facts.slots = vec![
            SlotInteractions {
                slot: PillarSlot::Year,
                interactions: vec![Interaction {
                    kind: "clash".into(),
                    source: "year_branch".into(),
                    favorable: false,
                    unfavorable: true,
                    related: vec![],
                }],
            },
            SlotInteractions {
                slot: PillarSlot::Day,
                interactions: vec![
                    Interaction {
                        kind: "harmony".into(),
                        source: "day_branch".into(),
                        favorable: true,
                        unfavorable: false,
                        related: vec![],
                    },
                    Interaction {
                        kind: "clash".into(),
                        source: "day_stem".into(),
                        favorable: false,
                        unfavorable: false,
                        related: vec![],
                    },
                ],
            },
        ];
        let flattened: Vec<_> = facts.all_interactions().collect();
        assert_eq!(flattened.len(), 3);
        assert_eq!(flattened[0].0, PillarSlot::Year);
        assert_eq!(flattened[2].1.kind, "clash");
    }

    #[test]
    fn test_cycle_reading_serde_shape() {
        let reading = CycleReading::Active("wood_ascendant".into());
        let json = serde_json::to_string(&reading).unwrap();
        let back: CycleReading = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tag(), Some("wood_ascendant"));
    }
}
