//! Rule-based auto-tiling for sparse 3D hexagonal grids
//!
//! A host paints integer values into a sparse grid of hex cells. Rules
//! classify a fixed neighbourhood around each cell and name an output tile;
//! the engine finds, for every candidate cell, the first rule that matches
//! under one of six rotations and writes the tile and its orientation into a
//! presentation layer.

#![forbid(unsafe_code)]

/// Rule patterns, rule sets and the recompute engine
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Hex coordinates, orientations, region iterators and grid storage
pub mod spatial;

pub use io::error::{Result, TileError};
