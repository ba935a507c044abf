//! # U-VecSort Core
//!
//! Foundational types shared by the U-VecSort crates.
//!
//! The sorter reorders the strokes of a laser-cutter or plotter job so the
//! head spends as little time as possible travelling between them with the
//! beam off. This crate holds the pieces every other crate agrees on:
//!
//! - **Geometry**: [`Point`], [`Segment`] and the [`fpeq`] tolerance helper
//! - **Configuration**: [`SortConfig`] and [`RefineLimit`]
//! - **Errors**: [`Error`] and [`Result`]
//!
//! ## Configuration
//!
//! ```rust
//! use u_vecsort_core::{Point, SortConfig};
//!
//! let config = SortConfig::new()
//!     .with_home_position(Point::new(10.0, 5.0))
//!     .with_refine_iterations(8);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;

// Re-exports
pub use config::{RefineLimit, SortConfig};
pub use error::{Error, Result};
pub use geometry::{fpeq, Point, Segment, EPSILON, MAX_COORDINATE};
