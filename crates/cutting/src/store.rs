//! Segment store: the unordered strokes of one pass.
//!
//! Insertion drops degenerate and duplicate strokes, so a store never holds
//! two copies of the same line in either direction. The duplicate scan is
//! linear, making a store of `n` strokes O(n²) to build; passes are
//! typically hundreds to low thousands of strokes.

use u_vecsort_core::{Point, Segment, MAX_COORDINATE};

use crate::arena::{SegmentArena, SegmentId, SegmentList};

/// What [`SegmentStore::insert`] did with a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The segment joined the store.
    Inserted(SegmentId),
    /// Both endpoints coincide; rejected.
    Degenerate,
    /// The same stroke (in either direction) is already stored; rejected.
    Duplicate,
    /// A coordinate is NaN or infinite; rejected.
    NonFinite,
    /// A coordinate exceeds [`MAX_COORDINATE`], so distances to it cannot
    /// be compared; rejected.
    OutOfRange,
}

impl InsertOutcome {
    /// Returns true if the segment was stored.
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Unordered, deduplicated collection of strokes for one pass.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    pub(crate) arena: SegmentArena,
    pub(crate) members: SegmentList,
}

impl SegmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store by inserting every segment in order.
    ///
    /// When near-duplicates compete, the first one fed in survives, so
    /// callers needing reproducibility should feed segments in a stable
    /// order.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut store = Self::new();
        for segment in segments {
            store.insert(segment);
        }
        store
    }

    /// Adds a segment unless it is unusable or a duplicate.
    pub fn insert(&mut self, segment: Segment) -> InsertOutcome {
        if !segment.is_finite() {
            log::warn!("Dropping non-finite segment {:?}", segment);
            return InsertOutcome::NonFinite;
        }
        if !segment.is_in_range() {
            log::warn!("Dropping out-of-range segment {:?}", segment);
            return InsertOutcome::OutOfRange;
        }
        if segment.is_degenerate() {
            return InsertOutcome::Degenerate;
        }
        if self
            .members
            .ids(&self.arena)
            .any(|id| self.arena.get(id).is_duplicate_of(&segment))
        {
            return InsertOutcome::Duplicate;
        }

        let id = self.arena.alloc(segment);
        self.members.push_back(&mut self.arena, id);
        InsertOutcome::Inserted(id)
    }

    /// Convenience wrapper taking raw coordinates.
    pub fn insert_coords(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> InsertOutcome {
        self.insert(Segment::from_coords(x1, y1, x2, y2))
    }

    /// Number of strokes still in the store.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the stored strokes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.members.ids(&self.arena).map(|id| self.arena.get(id))
    }

    /// Removes and returns the stroke with an endpoint nearest `at`.
    ///
    /// The returned stroke is oriented so that its start is the matched
    /// endpoint. Returns `None` once the store is exhausted.
    pub fn take_closest(&mut self, at: Point) -> Option<Segment> {
        take_closest(&mut self.arena, &mut self.members, at).map(|id| *self.arena.get(id))
    }
}

/// Builds a store from raw `(x1, y1, x2, y2)` tuples.
pub fn build_store<I>(segments: I) -> SegmentStore
where
    I: IntoIterator<Item = (f64, f64, f64, f64)>,
{
    SegmentStore::from_segments(
        segments
            .into_iter()
            .map(|(x1, y1, x2, y2)| Segment::from_coords(x1, y1, x2, y2)),
    )
}

/// Finds the member of `list` with an endpoint nearest `at`, unlinks it and
/// orients it so its start is that endpoint.
///
/// Both endpoints of every member are compared by squared distance. Ties
/// go to the first candidate seen, start endpoint before end endpoint.
/// Returns `None` if no member compares less than infinity. Insertion
/// keeps coordinates within [`MAX_COORDINATE`], so for a non-empty list
/// that means the geometry is broken.
pub(crate) fn take_closest(
    arena: &mut SegmentArena,
    list: &mut SegmentList,
    at: Point,
) -> Option<SegmentId> {
    let mut best: Option<(SegmentId, bool)> = None;
    let mut best_dist = f64::INFINITY;

    for id in list.ids(arena) {
        let segment = arena.get(id);

        let dist_a = at.distance_sq(segment.a);
        if dist_a < best_dist {
            best = Some((id, false));
            best_dist = dist_a;
        }

        let dist_b = at.distance_sq(segment.b);
        if dist_b < best_dist {
            best = Some((id, true));
            best_dist = dist_b;
        }
    }

    let (id, reverse) = best?;
    list.unlink(arena, id);
    if reverse {
        arena.get_mut(id).reverse();
    }
    Some(id)
}
