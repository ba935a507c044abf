//! Command-line front end for U-VecSort
//!
//! This crate provides:
//! - A reader for the pass-coloured vector file format
//! - A writer for the optimized device command stream
//! - A synthetic job generator for demos and measurements

mod parser;
mod synthetic;
mod writer;

pub use parser::{parse, parse_str, ParseError, ParsedJob, PassColor, PASS_COUNT};
pub use synthetic::SyntheticGenerator;
pub use writer::{write_chain, write_job, write_pass};
