//! Hexagonal coordinate system and grid storage
//!
//! This module contains spatial-related functionality including:
//! - Axial cell coordinates and continuous-space conversion
//! - Discrete tile orientations
//! - Region and volume iterators
//! - Source and presentation grid interfaces

/// Axial cell coordinates with a vertical axis
pub mod cell;
/// Source grid and presentation layer storage
pub mod grid;
/// Twelve-state tile orientation group
pub mod orientation;
/// Axial box and radial iterators
pub mod region;
/// Continuous-space box iterator
pub mod volume;

pub use cell::{CellId, OffsetCoord};
pub use grid::{PresentationGrid, SourceGrid, SparseGrid, TileLayer, TilePlacement};
pub use orientation::Orientation;
pub use region::{AxialIter, Planes, RadialIter};
pub use volume::VolumeIter;
