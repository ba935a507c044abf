//! Stroke sequencing for laser cutters and plotters.
//!
//! Given the unordered strokes of each pass of a job, this crate computes
//! a drawing order that keeps beam-off (transit) travel short without
//! splitting or reshaping any stroke.
//!
//! # Algorithm
//!
//! 1. **Deduplication**: degenerate strokes and exact or reversed
//!    duplicates are dropped as they enter a [`SegmentStore`]
//! 2. **Greedy sequencing**: nearest-endpoint construction, reversing a
//!    stroke when its end is the nearer endpoint ([`sequence`])
//! 3. **Refinement** (optional): repeatedly relocate the stroke behind the
//!    longest transit next to its nearest earlier neighbor and re-sequence
//!    the tail ([`refine`], [`refine_until_stable`])
//! 4. **Job assembly**: passes run in the caller's order with the head
//!    position carried between them ([`optimize_job`])
//!
//! This is a construction heuristic plus a single-move local search, not an
//! exact TSP solver.

pub mod arena;
pub mod chain;
pub mod metrics;
pub mod path;
pub mod refine;
pub mod result;
pub mod sequence;
pub mod store;

pub use arena::SegmentId;
pub use chain::Chain;
pub use metrics::{stats, stats_from, transit_length, ChainStats};
pub use path::{optimize_job, optimize_pass};
pub use refine::{refine, refine_until_stable, RefineOutcome, RefineSummary};
pub use result::{JobResult, JobSummary, PassResult, PassSummary};
pub use sequence::{sequence, SequenceResult};
pub use store::{build_store, InsertOutcome, SegmentStore};
