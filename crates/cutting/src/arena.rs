//! Index arena and intrusive doubly-linked lists over it.
//!
//! Segments live in a [`SegmentArena`] and never move. Membership in a
//! store or a chain is expressed through `prev`/`next` indices stored on
//! each node, which gives O(1) unlink, append and splice without aliasing
//! references. A node belongs to at most one [`SegmentList`] at a time.
//! Nodes are never freed, so indices stay valid for the arena's lifetime.

use u_vecsort_core::Segment;

/// Index of a segment within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    segment: Segment,
    prev: Option<SegmentId>,
    next: Option<SegmentId>,
}

/// Owning storage for the segments of one pass.
#[derive(Debug, Clone, Default)]
pub struct SegmentArena {
    nodes: Vec<Node>,
}

impl SegmentArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` segments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores a new, unlinked segment.
    pub fn alloc(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId(self.nodes.len());
        self.nodes.push(Node {
            segment,
            prev: None,
            next: None,
        });
        id
    }

    /// Number of segments ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The segment stored at `id`.
    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.nodes[id.0].segment
    }

    /// Mutable access for in-place reversal.
    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.nodes[id.0].segment
    }

    /// Successor of `id` in whichever list holds it.
    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        self.nodes[id.0].next
    }

    /// Predecessor of `id` in whichever list holds it.
    pub fn prev(&self, id: SegmentId) -> Option<SegmentId> {
        self.nodes[id.0].prev
    }
}

/// Head/tail handle of a linked list threaded through a [`SegmentArena`].
///
/// The handle does not own its nodes; every operation takes the arena that
/// holds them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentList {
    head: Option<SegmentId>,
    tail: Option<SegmentId>,
    len: usize,
}

impl SegmentList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    pub fn tail(&self) -> Option<SegmentId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends an unlinked node at the tail.
    pub fn push_back(&mut self, arena: &mut SegmentArena, id: SegmentId) {
        {
            let node = &mut arena.nodes[id.0];
            node.prev = self.tail;
            node.next = None;
        }
        match self.tail {
            Some(tail) => arena.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Removes `id` from this list, leaving it unlinked.
    ///
    /// `id` must be a member of this list.
    pub fn unlink(&mut self, arena: &mut SegmentArena, id: SegmentId) {
        let (prev, next) = {
            let node = &arena.nodes[id.0];
            (node.prev, node.next)
        };
        match prev {
            Some(p) => arena.nodes[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => arena.nodes[n.0].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut arena.nodes[id.0];
        node.prev = None;
        node.next = None;
        self.len -= 1;
    }

    /// Links the unlinked node `id` directly after member `after`.
    pub fn insert_after(&mut self, arena: &mut SegmentArena, after: SegmentId, id: SegmentId) {
        let next = arena.nodes[after.0].next;
        {
            let node = &mut arena.nodes[id.0];
            node.prev = Some(after);
            node.next = next;
        }
        arena.nodes[after.0].next = Some(id);
        match next {
            Some(n) => arena.nodes[n.0].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
    }

    /// Detaches everything after member `id` into a new list.
    ///
    /// Walks the detached part to count it.
    pub fn split_after(&mut self, arena: &mut SegmentArena, id: SegmentId) -> SegmentList {
        let Some(first) = arena.nodes[id.0].next.take() else {
            return SegmentList::new();
        };
        arena.nodes[first.0].prev = None;

        let mut detached = SegmentList {
            head: Some(first),
            tail: self.tail,
            len: 0,
        };
        let mut cursor = Some(first);
        while let Some(c) = cursor {
            detached.len += 1;
            cursor = arena.nodes[c.0].next;
        }

        self.tail = Some(id);
        self.len -= detached.len;
        detached
    }

    /// Moves every node of `other` onto the end of this list.
    pub fn append(&mut self, arena: &mut SegmentArena, other: SegmentList) {
        let Some(other_head) = other.head else {
            return;
        };
        match self.tail {
            Some(tail) => {
                arena.nodes[tail.0].next = Some(other_head);
                arena.nodes[other_head.0].prev = Some(tail);
            }
            None => self.head = Some(other_head),
        }
        self.tail = other.tail;
        self.len += other.len;
    }

    /// Iterates over member ids from head to tail.
    pub fn ids<'a>(&self, arena: &'a SegmentArena) -> ListIter<'a> {
        ListIter {
            arena,
            cursor: self.head,
        }
    }
}

/// Iterator over the ids of a [`SegmentList`].
pub struct ListIter<'a> {
    arena: &'a SegmentArena,
    cursor: Option<SegmentId>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = SegmentId;

    fn next(&mut self) -> Option<SegmentId> {
        let id = self.cursor?;
        self.cursor = self.arena.next(id);
        Some(id)
    }
}
