//! Grand-cycle transition detection across an ordered child series.
//!
//! The raw per-unit tag is nullable, and a missing tag after a tag has been
//! seen is a transient data gap, not the end of a cycle. The scan first
//! classifies every unit into an explicit [`CycleReading`], forward-fills the
//! gaps, then merges runs shorter than the configured minimum back into
//! their predecessor before reading off transitions.

use tracing::warn;

use fortunecast_core::types::{CycleReading, CycleTransition, FortuneReport};

/// One maximal run of a single forward-filled tag.
#[derive(Debug)]
struct Segment {
    tag: String,
    start_index: usize,
    len: usize,
}

/// Classify each child's cycle state, forward-filling missing tags.
pub(crate) fn classify(children: &[FortuneReport]) -> Vec<CycleReading> {
    let mut seen_any = false;
    children
        .iter()
        .map(|child| match child.basis.cycle.tag() {
            Some(tag) => {
                seen_any = true;
                CycleReading::Active(tag.to_string())
            }
            None if seen_any => CycleReading::Gap,
            None => CycleReading::NotStarted,
        })
        .collect()
}

/// Detect real transitions across the children.
///
/// Runs shorter than `min_run` units are dropped as noise and merged into
/// the preceding segment. The result is `Some` only when more than one real
/// transition remains.
pub(crate) fn detect_transitions(
    children: &[FortuneReport],
    min_run: usize,
) -> Option<Vec<CycleTransition>> {
    let readings = classify(children);

    // Build forward-filled segments of consecutive identical tags.
    let mut segments: Vec<Segment> = Vec::new();
    for (index, reading) in readings.iter().enumerate() {
        match reading {
            CycleReading::Active(tag) => {
                let extends = matches!(segments.last(), Some(last) if last.tag == *tag);
                if extends {
                    if let Some(last) = segments.last_mut() {
                        last.len += 1;
                    }
                } else {
                    segments.push(Segment {
                        tag: tag.clone(),
                        start_index: index,
                        len: 1,
                    });
                }
            }
            // Gaps extend the current segment; NotStarted precedes any tag.
            CycleReading::Gap => {
                if let Some(last) = segments.last_mut() {
                    last.len += 1;
                }
            }
            CycleReading::NotStarted => {}
        }
    }

    // Merge sub-minimum runs into their predecessor. The first segment has
    // no predecessor and stays regardless of length.
    let mut merged: Vec<Segment> = Vec::new();
    for segment in segments {
        if merged.is_empty() || segment.len >= min_run {
            // A dropped middle segment can leave identical neighbors.
            let same_tag = matches!(merged.last(), Some(last) if last.tag == segment.tag);
            if same_tag {
                if let Some(last) = merged.last_mut() {
                    last.len += segment.len;
                }
            } else {
                merged.push(segment);
            }
        } else {
            warn!(
                tag = %segment.tag,
                run_units = segment.len,
                min_run,
                "dropping short grand-cycle run as noise"
            );
            if let Some(last) = merged.last_mut() {
                last.len += segment.len;
            }
        }
    }

    let transitions: Vec<CycleTransition> = merged
        .windows(2)
        .map(|pair| CycleTransition {
            from: pair[0].tag.clone(),
            to: pair[1].tag.clone(),
            at: children[pair[1].start_index].start_date,
            run_units: pair[1].len,
        })
        .collect();

    if transitions.len() > 1 {
        Some(transitions)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::test_support::leaf_series;

    fn with_cycles(tags: &[Option<&str>]) -> Vec<FortuneReport> {
        let mut reports = leaf_series(tags.len(), 50.0, 50.0);
        for (report, tag) in reports.iter_mut().zip(tags) {
            report.basis.cycle = match tag {
                Some(tag) => CycleReading::Active((*tag).to_string()),
                None => CycleReading::NotStarted,
            };
        }
        reports
    }

    #[test]
    fn test_classify_distinguishes_gap_from_not_started() {
        let reports = with_cycles(&[None, Some("wood"), None, Some("wood")]);
        let readings = classify(&reports);
        assert_eq!(readings[0], CycleReading::NotStarted);
        assert_eq!(readings[2], CycleReading::Gap);
    }

    #[test]
    fn test_gap_is_forward_filled_not_a_transition() {
        let mut tags: Vec<Option<&str>> = vec![Some("wood"); 10];
        tags[4] = None; // transient gap inside one long run
        let reports = with_cycles(&tags);
        assert!(detect_transitions(&reports, 3).is_none());
    }

    #[test]
    fn test_short_run_dropped_and_neighbors_merged() {
        // wood x6, fire x1 (noise), wood x5: the blip disappears entirely.
        let mut tags: Vec<Option<&str>> = vec![Some("wood"); 12];
        tags[6] = Some("fire");
        let reports = with_cycles(&tags);
        assert!(detect_transitions(&reports, 3).is_none());
    }

    #[test]
    fn test_single_transition_is_not_exposed() {
        let mut tags: Vec<Option<&str>> = vec![Some("wood"); 6];
        tags.extend(std::iter::repeat(Some("fire")).take(6));
        let reports = with_cycles(&tags);
        // one real transition: below the more-than-one bar.
        assert!(detect_transitions(&reports, 3).is_none());
    }

    #[test]
    fn test_two_transitions_are_exposed_in_order() {
        let mut tags: Vec<Option<&str>> = Vec::new();
        tags.extend(std::iter::repeat(Some("wood")).take(5));
        tags.extend(std::iter::repeat(Some("fire")).take(5));
        tags.extend(std::iter::repeat(Some("earth")).take(5));
        let reports = with_cycles(&tags);
        let transitions = detect_transitions(&reports, 3).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].from, "wood");
        assert_eq!(transitions[0].to, "fire");
        assert_eq!(transitions[0].at, reports[5].start_date);
        assert_eq!(transitions[1].to, "earth");
        assert_eq!(transitions[1].run_units, 5);
    }
}
