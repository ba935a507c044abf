//! Result types for job optimization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use u_vecsort_core::Point;

use crate::chain::Chain;
use crate::metrics::ChainStats;
use crate::refine::RefineSummary;

/// Result of optimizing every pass of a job.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Non-empty passes in the order they were given.
    pub passes: Vec<PassResult>,

    /// Head position after the last pass.
    pub end: Point,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl JobResult {
    /// Creates an empty result resting at `end`.
    pub fn new(end: Point) -> Self {
        Self {
            passes: Vec::new(),
            end,
            computation_time_ms: 0,
        }
    }

    /// Sums the per-pass statistics after optimization.
    pub fn totals(&self) -> ChainStats {
        self.passes
            .iter()
            .fold(ChainStats::default(), |mut acc, pass| {
                acc.cut_count += pass.after.cut_count;
                acc.cut_length += pass.after.cut_length;
                acc.transit_count += pass.after.transit_count;
                acc.transit_length += pass.after.transit_length;
                acc
            })
    }

    /// Builds the serializable summary of this result.
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            passes: self
                .passes
                .iter()
                .map(|p| PassSummary {
                    index: p.index,
                    segments: p.chain.len(),
                    start: p.start,
                    end: p.end,
                    before: p.before,
                    after: p.after,
                    refine: p.refine,
                })
                .collect(),
            totals: self.totals(),
            end: self.end,
            computation_time_ms: self.computation_time_ms,
        }
    }
}

/// The optimized order of a single pass.
#[derive(Debug, Clone)]
pub struct PassResult {
    /// Position of the pass in the job.
    pub index: usize,

    /// Strokes in drawing order.
    pub chain: Chain,

    /// Head position when the pass begins.
    pub start: Point,

    /// Head position when the pass ends.
    pub end: Point,

    /// Statistics of the strokes in their input order.
    pub before: ChainStats,

    /// Statistics of the optimized order.
    pub after: ChainStats,

    /// What refinement achieved.
    pub refine: RefineSummary,
}

/// Per-pass figures of a [`JobSummary`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PassSummary {
    pub index: usize,
    pub segments: usize,
    pub start: Point,
    pub end: Point,
    pub before: ChainStats,
    pub after: ChainStats,
    pub refine: RefineSummary,
}

/// Chain-free report of a [`JobResult`], suitable for logging or export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JobSummary {
    pub passes: Vec<PassSummary>,
    pub totals: ChainStats,
    pub end: Point,
    pub computation_time_ms: u64,
}
