//! Synthetic vector file generator.
//!
//! Produces jobs that look like real cutter input: closed outlines, open
//! polylines and loose strokes spread over all three passes. Useful for
//! demos and for measuring how much the sorter saves.

use std::f64::consts::PI;
use std::fmt::Write;

use rand::prelude::*;

/// Generator for synthetic vector files.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
    /// Side length of the square work area.
    pub extent: f64,
}

/// Power lines for green, red and blue passes, in file (b g r) order.
const PASS_COLORS: [&str; 3] = ["P 0 255 0", "P 0 0 255", "P 255 0 0"];

impl SyntheticGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            extent: 500.0,
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            extent: 500.0,
        }
    }

    /// Sets the work area size.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Generates a vector file with `count` shapes.
    pub fn generate(&mut self, count: usize) -> String {
        let mut out = String::new();
        for _ in 0..count {
            let pass = self.rng.gen_range(0..PASS_COLORS.len());
            // Writing into a String cannot fail
            let _ = writeln!(out, "{}", PASS_COLORS[pass]);

            match self.rng.gen_range(0..3) {
                0 => self.closed_polygon(&mut out),
                1 => self.polyline(&mut out),
                _ => self.stroke(&mut out),
            }
        }
        out.push_str("X\n");
        out
    }

    /// A regular polygon closed with `Z`.
    fn closed_polygon(&mut self, out: &mut String) {
        let sides = self.rng.gen_range(3..=8);
        let radius = self.rng.gen_range(5.0..30.0);
        let (cx, cy) = self.point(radius);
        let phase = self.rng.gen_range(0.0..PI);

        for i in 0..sides {
            let angle = phase + 2.0 * PI * (i as f64) / (sides as f64);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = writeln!(
                out,
                "{} {:.3} {:.3}",
                cmd,
                cx + radius * angle.cos(),
                cy + radius * angle.sin()
            );
        }
        out.push_str("Z\n");
    }

    /// An open random walk.
    fn polyline(&mut self, out: &mut String) {
        let steps = self.rng.gen_range(2..=10);
        let (mut x, mut y) = self.point(0.0);
        let _ = writeln!(out, "M {:.3} {:.3}", x, y);
        for _ in 0..steps {
            x = (x + self.rng.gen_range(-20.0..20.0)).clamp(0.0, self.extent);
            y = (y + self.rng.gen_range(-20.0..20.0)).clamp(0.0, self.extent);
            let _ = writeln!(out, "L {:.3} {:.3}", x, y);
        }
    }

    /// A single loose stroke.
    fn stroke(&mut self, out: &mut String) {
        let (x1, y1) = self.point(0.0);
        let (x2, y2) = self.point(0.0);
        let _ = writeln!(out, "M {:.3} {:.3}\nL {:.3} {:.3}", x1, y1, x2, y2);
    }

    /// A random point at least `margin` inside the work area.
    fn point(&mut self, margin: f64) -> (f64, f64) {
        let lo = margin.min(self.extent / 2.0);
        let hi = self.extent - lo;
        if hi <= lo {
            return (lo, lo);
        }
        (self.rng.gen_range(lo..hi), self.rng.gen_range(lo..hi))
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}
