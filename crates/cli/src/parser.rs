//! Reader for the line-oriented vector file format.
//!
//! One command per line:
//!
//! ```text
//! P b g r   select the pass by colour (note the blue-green-red order)
//! M x y     start a new path at (x, y)
//! L x y     line from the current point to (x, y)
//! Z         line from the current point back to the path start
//! X         end of input
//! ```
//!
//! Paths are split into individual strokes and fed to the pass's segment
//! store, which drops degenerate strokes and duplicates.

use std::io::BufRead;

use thiserror::Error;
use u_vecsort_core::{Point, Segment};
use u_vecsort_cutting::SegmentStore;

/// Number of passes a vector file can address.
pub const PASS_COUNT: usize = 3;

/// Errors that can occur while reading a vector file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: char },

    #[error("line {line}: expected {expected} values after '{command}'")]
    MissingValue {
        line: usize,
        command: char,
        expected: usize,
    },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: colour {r},{g},{b} is not pure red, green or blue")]
    UnknownColor { line: usize, r: i64, g: i64, b: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The colour classes that map to passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassColor {
    Green,
    Red,
    Blue,
}

impl PassColor {
    /// Classifies a colour with exactly one non-zero channel.
    pub fn classify(r: i64, g: i64, b: i64) -> Option<Self> {
        match (r != 0, g != 0, b != 0) {
            (false, true, false) => Some(Self::Green),
            (true, false, false) => Some(Self::Red),
            (false, false, true) => Some(Self::Blue),
            _ => None,
        }
    }

    /// Position of the pass in the job.
    pub fn pass_index(self) -> usize {
        match self {
            Self::Green => 0,
            Self::Red => 1,
            Self::Blue => 2,
        }
    }
}

/// Strokes read from a vector file, one store per pass.
#[derive(Debug, Clone)]
pub struct ParsedJob {
    /// Stores indexed by [`PassColor::pass_index`].
    pub passes: Vec<SegmentStore>,
    /// `L` commands read, before deduplication. Closing strokes from `Z`
    /// are not counted.
    pub segments_read: usize,
}

impl ParsedJob {
    /// Strokes that survived deduplication.
    pub fn segments_kept(&self) -> usize {
        self.passes.iter().map(SegmentStore::len).sum()
    }
}

/// Reads a vector file.
///
/// Blank lines are ignored. Strokes before the first `P` command go to the
/// first pass.
pub fn parse<R: BufRead>(reader: R) -> Result<ParsedJob, ParseError> {
    let mut passes: Vec<SegmentStore> = (0..PASS_COUNT).map(|_| SegmentStore::new()).collect();
    let mut pass = 0;
    let mut path_start = Point::ORIGIN;
    let mut current = Point::ORIGIN;
    let mut segments_read = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        let Some(command) = chars.next() else {
            continue;
        };
        let args = chars.as_str();

        match command {
            'P' => {
                // Channels are stored blue first
                let [b, g, r] = parse_values::<i64, 3>(args, line_no, command)?;
                let color = PassColor::classify(r, g, b)
                    .ok_or(ParseError::UnknownColor { line: line_no, r, g, b })?;
                pass = color.pass_index();
            }
            'M' => {
                let [x, y] = parse_values::<f64, 2>(args, line_no, command)?;
                path_start = Point::new(x, y);
                current = path_start;
            }
            'L' => {
                let [x, y] = parse_values::<f64, 2>(args, line_no, command)?;
                let to = Point::new(x, y);
                passes[pass].insert(Segment::new(current, to));
                segments_read += 1;
                current = to;
            }
            'Z' => {
                passes[pass].insert(Segment::new(current, path_start));
                current = path_start;
            }
            'X' => break,
            other => {
                return Err(ParseError::UnknownCommand {
                    line: line_no,
                    command: other,
                })
            }
        }
    }

    let job = ParsedJob {
        passes,
        segments_read,
    };
    log::info!(
        "Read {} segments, {} kept after deduplication",
        job.segments_read,
        job.segments_kept()
    );
    Ok(job)
}

/// Reads a vector file held in memory.
pub fn parse_str(input: &str) -> Result<ParsedJob, ParseError> {
    parse(input.as_bytes())
}

/// Parses exactly `N` whitespace- or comma-separated values.
fn parse_values<T, const N: usize>(
    args: &str,
    line: usize,
    command: char,
) -> Result<[T; N], ParseError>
where
    T: std::str::FromStr + Default + Copy,
{
    let mut values = [T::default(); N];
    let mut tokens = args
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    for slot in values.iter_mut() {
        let token = tokens.next().ok_or(ParseError::MissingValue {
            line,
            command,
            expected: N,
        })?;
        *slot = token.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            value: token.to_string(),
        })?;
    }

    Ok(values)
}
