//! Writer for the optimized command stream.
//!
//! Each pass opens with a `P` power line carrying 100 in the channel of
//! that pass. Strokes that start where the previous one ended extend the
//! current line with `L`; any other stroke is preceded by a blank line and
//! an `M` move with the beam off.

use std::io::{self, Write};

use u_vecsort_core::Point;
use u_vecsort_cutting::{Chain, JobResult, PassResult};

/// Power level written for the active channel.
const FULL_POWER: u32 = 100;

/// Writes every pass of an optimized job.
pub fn write_job<W: Write>(out: &mut W, job: &JobResult) -> io::Result<()> {
    for pass in &job.passes {
        write_pass(out, pass)?;
    }
    Ok(())
}

/// Writes one pass: its power line, its strokes and the trailing blank lines.
pub fn write_pass<W: Write>(out: &mut W, pass: &PassResult) -> io::Result<()> {
    let channel = |i: usize| if pass.index == i { FULL_POWER } else { 0 };
    writeln!(out, "P {} {} {}", channel(0), channel(1), channel(2))?;
    write_chain(out, &pass.chain)?;
    write!(out, "\n\n")
}

/// Writes the strokes of a chain.
///
/// The first stroke always gets an explicit move.
pub fn write_chain<W: Write>(out: &mut W, chain: &Chain) -> io::Result<()> {
    let mut pen: Option<Point> = None;

    for segment in chain.iter() {
        if pen.is_some_and(|p| p.approx_eq(segment.a)) {
            writeln!(out, "L {:.3} {:.3}", segment.b.x, segment.b.y)?;
        } else {
            write!(
                out,
                "\nM {:.3} {:.3}\nL {:.3} {:.3}\n",
                segment.a.x, segment.a.y, segment.b.x, segment.b.y
            )?;
        }
        pen = Some(segment.b);
    }

    writeln!(out)
}
