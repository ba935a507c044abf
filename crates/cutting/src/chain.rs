//! Ordered chain of strokes produced by the sequencer.

use u_vecsort_core::{Point, Segment};

use crate::arena::{SegmentArena, SegmentId, SegmentList};

/// The traversal order of one pass.
///
/// A chain owns the arena its strokes were allocated in, so strokes can be
/// unlinked and spliced elsewhere in O(1) without rebuilding the order.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    pub(crate) arena: SegmentArena,
    pub(crate) order: SegmentList,
}

impl Chain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(arena: SegmentArena, order: SegmentList) -> Self {
        Self { arena, order }
    }

    /// Builds a chain that keeps the given order and orientation.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut chain = Self::new();
        for segment in segments {
            let id = chain.arena.alloc(segment);
            chain.order.push_back(&mut chain.arena, id);
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First stroke drawn.
    pub fn first(&self) -> Option<&Segment> {
        self.order.head().map(|id| self.arena.get(id))
    }

    /// Last stroke drawn.
    pub fn last(&self) -> Option<&Segment> {
        self.order.tail().map(|id| self.arena.get(id))
    }

    /// Where the head rests after drawing the chain from `start`.
    pub fn end_position(&self, start: Point) -> Point {
        self.last().map_or(start, |s| s.b)
    }

    /// Stroke ids in drawing order.
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.order.ids(&self.arena)
    }

    /// Strokes in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.ids().map(|id| self.arena.get(id))
    }

    /// Copies the strokes out in drawing order.
    pub fn to_vec(&self) -> Vec<Segment> {
        self.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Segment;
    type IntoIter = Box<dyn Iterator<Item = &'a Segment> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
