//! Configuration for stroke sequencing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Point;

/// How many refinement attempts to make per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefineLimit {
    /// At most this many attempts. Zero keeps the greedy order.
    Fixed(usize),
    /// Twice the number of segments in the pass.
    Auto,
}

impl RefineLimit {
    /// Resolves the cap for a pass holding `segments` strokes.
    pub fn resolve(self, segments: usize) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::Auto => segments.saturating_mul(2),
        }
    }
}

impl Default for RefineLimit {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

/// Configuration parameters for sequencing a job.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortConfig {
    /// Head position before the first pass. Default is the origin.
    pub home_position: Point,

    /// Refinement attempts per pass after greedy sequencing.
    pub refine_limit: RefineLimit,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            home_position: Point::ORIGIN,
            refine_limit: RefineLimit::default(),
        }
    }
}

impl SortConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the home position.
    pub fn with_home_position(mut self, home: Point) -> Self {
        self.home_position = home;
        self
    }

    /// Sets a fixed refinement cap.
    pub fn with_refine_iterations(mut self, iterations: usize) -> Self {
        self.refine_limit = RefineLimit::Fixed(iterations);
        self
    }

    /// Scales the refinement cap with the pass size.
    pub fn with_auto_refine(mut self) -> Self {
        self.refine_limit = RefineLimit::Auto;
        self
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> Result<()> {
        if !self.home_position.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "home position {:?} is not finite",
                self.home_position
            )));
        }
        if !self.home_position.is_in_range() {
            return Err(Error::InvalidConfig(format!(
                "home position {:?} is beyond the supported coordinate range",
                self.home_position
            )));
        }
        Ok(())
    }
}
