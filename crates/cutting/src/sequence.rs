//! Greedy stroke sequencing.
//!
//! Builds the drawing order of a pass by repeatedly extracting the stroke
//! whose nearer endpoint is closest to the current head position, reversing
//! it if its end was the nearer endpoint, and moving the head to its end.
//!
//! This is the nearest-neighbor construction heuristic for the open
//! Hamiltonian path through the strokes: locally optimal at each step, not
//! globally optimal, and sensitive to the tie-breaks of the closest-endpoint
//! search.

use u_vecsort_core::{Error, Point, Result};

use crate::arena::{SegmentArena, SegmentList};
use crate::chain::Chain;
use crate::store::{take_closest, SegmentStore};

/// Result of sequencing a store.
#[derive(Debug, Clone)]
pub struct SequenceResult {
    /// Strokes in drawing order, possibly reversed.
    pub chain: Chain,
    /// Head position after the last stroke, or the start if there were none.
    pub end: Point,
}

/// Drains `store` into a chain, starting from the head position `start`.
///
/// Every stored stroke appears in the chain exactly once. The returned end
/// position feeds the next pass.
pub fn sequence(store: SegmentStore, start: Point) -> Result<SequenceResult> {
    let SegmentStore {
        mut arena,
        mut members,
    } = store;

    let (order, end) = sequence_list(&mut arena, &mut members, start)?;

    Ok(SequenceResult {
        chain: Chain::from_parts(arena, order),
        end,
    })
}

/// Moves every member of `source` into a new list in greedy order.
///
/// `source` is left empty. Fails if the closest-endpoint search comes back
/// empty while members remain, which only happens with corrupted geometry.
pub(crate) fn sequence_list(
    arena: &mut SegmentArena,
    source: &mut SegmentList,
    start: Point,
) -> Result<(SegmentList, Point)> {
    let mut order = SegmentList::new();
    let mut current = start;

    while !source.is_empty() {
        let id = take_closest(arena, source, current).ok_or_else(|| {
            Error::Internal(format!(
                "no closest segment to {} among {} remaining",
                current,
                source.len()
            ))
        })?;

        order.push_back(arena, id);
        current = arena.get(id).b;
    }

    Ok((order, current))
}
