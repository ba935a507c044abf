//! Job-level driver and public entry point.
//!
//! Sequences each pass in the caller's order, carrying the head position
//! from the end of one pass to the start of the next. Passes are optimized
//! independently: refinement never looks across a pass boundary and no
//! stroke moves between passes.

use std::time::Instant;

use u_vecsort_core::{Point, Result, SortConfig};

use crate::metrics::{stats_from, ChainStats};
use crate::refine::refine_until_stable;
use crate::result::{JobResult, PassResult};
use crate::sequence::sequence;
use crate::store::SegmentStore;

/// Optimizes the drawing order of a whole job.
///
/// Empty passes are skipped and do not appear in the result; the indices
/// of the remaining passes refer to their position in `passes`.
///
/// # Example
///
/// ```rust
/// use u_vecsort_core::SortConfig;
/// use u_vecsort_cutting::{build_store, optimize_job};
///
/// let outlines = build_store([(0.0, 0.0, 10.0, 0.0), (10.0, 0.0, 10.0, 10.0)]);
/// let engraving = build_store([(2.0, 2.0, 3.0, 3.0)]);
///
/// let result = optimize_job(vec![outlines, engraving], &SortConfig::default()).unwrap();
/// assert_eq!(result.passes.len(), 2);
/// ```
pub fn optimize_job(passes: Vec<SegmentStore>, config: &SortConfig) -> Result<JobResult> {
    config.validate()?;
    let started = Instant::now();

    let mut result = JobResult::new(config.home_position);
    let mut pen = config.home_position;

    for (index, store) in passes.into_iter().enumerate() {
        if store.is_empty() {
            continue;
        }

        let pass = optimize_pass(index, store, pen, config)?;
        pen = pass.end;
        result.passes.push(pass);
    }

    result.end = pen;
    result.computation_time_ms = started.elapsed().as_millis() as u64;
    Ok(result)
}

/// Sequences and refines a single pass starting at `start`.
///
/// Greedy sequencing starts from `start`, but refinement is measured from
/// the first stroke's own start. The move into the first stroke cannot be
/// removed by relocating strokes, and when the pass lies far from `start`
/// it would otherwise always be the longest transit and stall refinement.
/// The `before` and `after` statistics still include that entry move.
pub fn optimize_pass(
    index: usize,
    store: SegmentStore,
    start: Point,
    config: &SortConfig,
) -> Result<PassResult> {
    let segments = store.len();
    let before = ChainStats::measure(store.iter(), start);
    log::info!("Pass {}: {} segments", index, segments);
    log::info!("{}", before);

    let sequenced = sequence(store, start)?;
    let mut chain = sequenced.chain;

    let max_attempts = config.refine_limit.resolve(segments);
    let entry = chain.first().map_or(start, |s| s.a);
    let refine = refine_until_stable(&mut chain, entry, max_attempts)?;
    if refine.improvements > 0 {
        log::debug!(
            "Pass {}: refinement removed {:.3} transit in {} moves",
            index,
            refine.total_reduction,
            refine.improvements
        );
    }

    let after = stats_from(&chain, start);
    log::info!("{}", after);

    let end = chain.end_position(start);
    Ok(PassResult {
        index,
        chain,
        start,
        end,
        before,
        after,
        refine,
    })
}
