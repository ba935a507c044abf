//! Long-transit refinement.
//!
//! A single local-search move over an already sequenced chain:
//!
//! 1. Find the stroke reached by the longest transit.
//! 2. Among the strokes drawn before it, find the one whose end lies
//!    closest to its start.
//! 3. Move the stroke to follow that neighbor.
//! 4. Greedily re-sequence everything after the moved stroke, starting
//!    from its end.
//!
//! The move is kept only if the total transit strictly shrinks; otherwise
//! the chain is restored. Callers repeat the move while it keeps paying
//! off, up to a cap; see [`refine_until_stable`].

use u_vecsort_core::{fpeq, Point, Result};

use crate::arena::SegmentId;
use crate::chain::Chain;
use crate::metrics::transit_length;
use crate::sequence::sequence_list;

/// Result of one refinement attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineOutcome {
    /// Transit length removed by the move. Zero when nothing was applied.
    pub reduction: f64,
    /// Head position after the chain.
    pub end: Point,
    /// Whether the chain was changed.
    pub applied: bool,
}

impl RefineOutcome {
    fn unchanged(end: Point) -> Self {
        Self {
            reduction: 0.0,
            end,
            applied: false,
        }
    }
}

/// Summary of a repeated refinement run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefineSummary {
    /// Attempts made, including the final unsuccessful one.
    pub attempts: usize,
    /// Attempts that shortened the transit.
    pub improvements: usize,
    /// Total transit length removed.
    pub total_reduction: f64,
}

/// Attempts one relocation of the longest-transit stroke.
///
/// `start` is the head position before the chain's first stroke. A chain
/// without any transit (every stroke starts where the previous one ended),
/// or whose longest transit leads into its first stroke, is left as is.
pub fn refine(chain: &mut Chain, start: Point) -> Result<RefineOutcome> {
    let end_before = chain.end_position(start);

    let Some((worst, max_transit)) = longest_transit(chain, start) else {
        log::debug!("No transit to refine");
        return Ok(RefineOutcome::unchanged(end_before));
    };

    let target = chain.arena.get(worst).a;
    let Some(anchor) = closest_end_before(chain, worst, target) else {
        log::debug!("Longest transit leads into the first segment");
        return Ok(RefineOutcome::unchanged(end_before));
    };

    let initial = transit_length(chain, start);
    log::debug!(
        "Total transit {:.3}, longest {:.3} into {}",
        initial,
        max_transit,
        target
    );

    let snapshot = chain.clone();

    chain.order.unlink(&mut chain.arena, worst);
    chain.order.insert_after(&mut chain.arena, anchor, worst);

    let mut suffix = chain.order.split_after(&mut chain.arena, worst);
    let seed = chain.arena.get(worst).b;
    let (resequenced, end) = sequence_list(&mut chain.arena, &mut suffix, seed)?;
    chain.order.append(&mut chain.arena, resequenced);

    let refined = transit_length(chain, start);
    log::debug!("Refined transit {:.3}", refined);

    let reduction = initial - refined;
    if reduction > 0.0 {
        Ok(RefineOutcome {
            reduction,
            end,
            applied: true,
        })
    } else {
        *chain = snapshot;
        Ok(RefineOutcome::unchanged(end_before))
    }
}

/// Repeats [`refine`] until an attempt stops paying off or `max_attempts`
/// attempts have been made.
pub fn refine_until_stable(
    chain: &mut Chain,
    start: Point,
    max_attempts: usize,
) -> Result<RefineSummary> {
    let mut summary = RefineSummary::default();

    while summary.attempts < max_attempts {
        let outcome = refine(chain, start)?;
        summary.attempts += 1;
        if outcome.reduction <= 0.0 {
            break;
        }
        summary.improvements += 1;
        summary.total_reduction += outcome.reduction;
    }

    Ok(summary)
}

/// The stroke reached by the longest non-zero transit, and that length.
/// The first of several equally long transits wins.
fn longest_transit(chain: &Chain, start: Point) -> Option<(SegmentId, f64)> {
    let mut pen = start;
    let mut longest: Option<(SegmentId, f64)> = None;

    for id in chain.ids() {
        let segment = chain.arena.get(id);
        let transit = pen.distance(segment.a);
        if !fpeq(transit, 0.0) && longest.map_or(true, |(_, max)| transit > max) {
            longest = Some((id, transit));
        }
        pen = segment.b;
    }

    longest
}

/// The stroke before `stop` whose end is nearest `target`. Only a strictly
/// nearer end replaces the current candidate, so the earliest of several
/// equally near strokes wins.
fn closest_end_before(chain: &Chain, stop: SegmentId, target: Point) -> Option<SegmentId> {
    let mut closest: Option<(SegmentId, f64)> = None;

    for id in chain.ids().take_while(|&id| id != stop) {
        let dist = chain.arena.get(id).b.distance_sq(target);
        if closest.map_or(true, |(_, best)| dist < best) {
            closest = Some((id, dist));
        }
    }

    closest.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::stats_from;
    use crate::sequence::sequence;
    use crate::store::build_store;
    use approx::assert_relative_eq;
    use u_vecsort_core::Segment;

    fn chain_of(segments: &[(f64, f64, f64, f64)]) -> Chain {
        Chain::from_segments(
            segments
                .iter()
                .map(|&(x1, y1, x2, y2)| Segment::from_coords(x1, y1, x2, y2)),
        )
    }

    #[test]
    fn test_empty_chain_is_unchanged() {
        let mut chain = Chain::new();
        let outcome = refine(&mut chain, Point::new(1.0, 2.0)).expect("refine");
        assert!(!outcome.applied);
        assert_eq!(outcome.reduction, 0.0);
        assert_eq!(outcome.end, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_continuous_chain_is_unchanged() {
        let mut chain = chain_of(&[
            (0.0, 0.0, 1.0, 0.0),
            (1.0, 0.0, 1.0, 1.0),
            (1.0, 1.0, 0.0, 1.0),
        ]);
        let before = chain.to_vec();
        let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");
        assert!(!outcome.applied);
        assert_eq!(chain.to_vec(), before);
        assert_eq!(outcome.end, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_longest_transit_into_first_segment() {
        let mut chain = chain_of(&[(50.0, 0.0, 51.0, 0.0), (51.0, 0.0, 52.0, 0.0)]);
        let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");
        assert!(!outcome.applied);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_relocation_shortens_transit() {
        // The far stroke (10,0)-(11,0) was drawn in between two strokes that
        // meet at the origin cluster; relocating the stroke that follows it
        // removes the long return trip.
        let mut chain = chain_of(&[
            (0.0, 0.0, 1.0, 0.0),
            (10.0, 0.0, 11.0, 0.0),
            (1.0, 0.0, 2.0, 0.0),
        ]);
        let before = transit_length(&chain, Point::ORIGIN);

        let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");
        let after = transit_length(&chain, Point::ORIGIN);

        assert!(outcome.applied);
        assert_relative_eq!(outcome.reduction, before - after, epsilon = 1e-9);
        assert_eq!(
            chain.to_vec(),
            vec![
                Segment::from_coords(0.0, 0.0, 1.0, 0.0),
                Segment::from_coords(1.0, 0.0, 2.0, 0.0),
                Segment::from_coords(10.0, 0.0, 11.0, 0.0),
            ]
        );
        assert_eq!(outcome.end, Point::new(11.0, 0.0));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_anchor_tie_prefers_earliest() {
        // Both prefix strokes end exactly 1 away from the start of the
        // longest-transit stroke (5,0)-(5,10); the earlier one becomes its
        // anchor.
        let mut chain = chain_of(&[
            (0.0, 0.0, 4.0, 0.0),
            (6.0, 20.0, 6.0, 0.0),
            (20.0, 20.0, 30.0, 20.0),
            (5.0, 0.0, 5.0, 10.0),
        ]);
        let worst = longest_transit(&chain, Point::ORIGIN).expect("has transit");
        assert_eq!(*chain.arena.get(worst.0), Segment::from_coords(5.0, 0.0, 5.0, 10.0));

        let ids: Vec<SegmentId> = chain.ids().collect();
        let anchor = closest_end_before(&chain, worst.0, Point::new(5.0, 0.0));
        assert_eq!(anchor, Some(ids[0]));
    }

    #[test]
    fn test_refine_moves_stroke_after_earliest_tied_anchor() {
        let mut chain = chain_of(&[
            (0.0, 0.0, 4.0, 0.0),
            (6.0, 20.0, 6.0, 0.0),
            (20.0, 20.0, 30.0, 20.0),
            (5.0, 0.0, 5.0, 10.0),
        ]);
        let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");

        assert!(outcome.applied);
        // Following (6,20)-(6,0) instead would give a different order
        assert_eq!(
            chain.to_vec(),
            vec![
                Segment::from_coords(0.0, 0.0, 4.0, 0.0),
                Segment::from_coords(5.0, 0.0, 5.0, 10.0),
                Segment::from_coords(6.0, 20.0, 6.0, 0.0),
                Segment::from_coords(20.0, 20.0, 30.0, 20.0),
            ]
        );
        assert_eq!(outcome.end, Point::new(30.0, 20.0));
        assert_relative_eq!(
            transit_length(&chain, Point::ORIGIN),
            1.0 + 101.0_f64.sqrt() + 596.0_f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_first_longest_transit_wins() {
        let chain = chain_of(&[
            (0.0, 0.0, 1.0, 0.0),
            (1.0, 5.0, 1.0, 6.0),
            (1.0, 11.0, 1.0, 12.0),
        ]);
        let ids: Vec<SegmentId> = chain.ids().collect();
        let (worst, len) = longest_transit(&chain, Point::ORIGIN).expect("has transit");
        assert_eq!(worst, ids[1]);
        assert_relative_eq!(len, 5.0);
    }

    #[test]
    fn test_non_improving_move_is_rolled_back() {
        let store = build_store([
            (0.0, 0.0, 1.0, 0.0),
            (1.0, 0.0, 1.0, 1.0),
            (5.0, 5.0, 5.0, 6.0),
        ]);
        let mut chain = sequence(store, Point::ORIGIN).expect("sequencing").chain;
        let before = chain.to_vec();
        let outcome = refine(&mut chain, Point::ORIGIN).expect("refine");

        assert!(!outcome.applied);
        assert_eq!(chain.to_vec(), before);
        assert_eq!(outcome.end, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_until_stable_respects_cap() {
        let mut chain = chain_of(&[
            (0.0, 0.0, 1.0, 0.0),
            (10.0, 0.0, 11.0, 0.0),
            (1.0, 0.0, 2.0, 0.0),
        ]);
        let summary = refine_until_stable(&mut chain, Point::ORIGIN, 0).expect("refine");
        assert_eq!(summary, RefineSummary::default());

        let summary = refine_until_stable(&mut chain, Point::ORIGIN, 10).expect("refine");
        assert_eq!(summary.improvements, 1);
        assert_eq!(summary.attempts, 2);
        assert!(summary.total_reduction > 0.0);
    }

    #[test]
    fn test_refine_keeps_every_segment() {
        let mut chain = chain_of(&[
            (0.0, 0.0, 1.0, 0.0),
            (30.0, 30.0, 31.0, 30.0),
            (2.0, 0.0, 3.0, 0.0),
            (31.0, 31.0, 32.0, 32.0),
            (4.0, 0.0, 5.0, 0.0),
        ]);
        let before = stats_from(&chain, Point::ORIGIN);
        refine_until_stable(&mut chain, Point::ORIGIN, 10).expect("refine");
        let after = stats_from(&chain, Point::ORIGIN);

        assert_eq!(chain.len(), 5);
        assert_relative_eq!(before.cut_length, after.cut_length, epsilon = 1e-9);
        assert!(after.transit_length <= before.transit_length);
    }
}
