//! Cut and transit statistics for a chain.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use u_vecsort_core::{Point, Segment};

use crate::chain::Chain;

/// Aggregate lengths and counts for one drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainStats {
    /// Strokes with non-zero drawn length.
    pub cut_count: usize,
    /// Sum of drawn lengths.
    pub cut_length: f64,
    /// Moves with the beam off, excluding zero-length joins.
    pub transit_count: usize,
    /// Sum of beam-off travel.
    pub transit_length: f64,
}

impl ChainStats {
    /// Folds over strokes in drawing order with the head starting at `start`.
    pub fn measure<'a, I>(segments: I, start: Point) -> Self
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        let mut stats = Self::default();
        let mut pen = start;

        for segment in segments {
            let transit = pen.distance(segment.a);
            if transit != 0.0 {
                stats.transit_count += 1;
                stats.transit_length += transit;
            }

            let cut = segment.length();
            if cut != 0.0 {
                stats.cut_count += 1;
                stats.cut_length += cut;
            }

            pen = segment.b;
        }

        stats
    }

    /// Returns the total travel (cutting + transit).
    pub fn total_distance(&self) -> f64 {
        self.cut_length + self.transit_length
    }

    /// Returns the share of travel spent cutting.
    pub fn efficiency(&self) -> f64 {
        let total = self.total_distance();
        if total > 0.0 {
            self.cut_length / total
        } else {
            0.0
        }
    }
}

impl fmt::Display for ChainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cuts: {} len {:.0}", self.cut_count, self.cut_length)?;
        write!(f, "Move: {} len {:.0}", self.transit_count, self.transit_length)
    }
}

/// Statistics of a chain drawn with the head starting at the origin.
pub fn stats(chain: &Chain) -> ChainStats {
    stats_from(chain, Point::ORIGIN)
}

/// Statistics of a chain drawn with the head starting at `start`.
pub fn stats_from(chain: &Chain, start: Point) -> ChainStats {
    ChainStats::measure(chain.iter(), start)
}

/// Total beam-off travel of a chain drawn from `start`.
pub fn transit_length(chain: &Chain, start: Point) -> f64 {
    stats_from(chain, start).transit_length
}
