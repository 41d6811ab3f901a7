//! Sparse source grids and the presentation layer the engine writes into
//!
//! The engine only ever reads a [`SourceGrid`] and writes a
//! [`PresentationGrid`]; both are traits so a host can back them with its
//! own storage. [`SparseGrid`] and [`TileLayer`] are the in-crate
//! implementations used by the CLI and tests.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::spatial::cell::CellId;
use crate::spatial::orientation::Orientation;

/// Read access to painted cell values
pub trait SourceGrid {
    /// Value stored at `cell`, if any
    fn get(&self, cell: CellId) -> Option<i32>;

    /// Every populated cell with its value
    fn cells(&self) -> impl Iterator<Item = (CellId, i32)> + '_;
}

/// One derived tile assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    /// Cell receiving the tile
    pub cell: CellId,
    /// Output tile identifier from the matching rule
    pub tile: i32,
    /// Rotation under which the rule matched
    pub orientation: Orientation,
}

/// Write access to the derived tile layer
///
/// The engine always clears, then sets every placement in one call.
pub trait PresentationGrid {
    /// Remove every tile
    fn clear(&mut self);

    /// Set many tiles at once
    fn set_cells(&mut self, placements: &[TilePlacement]);
}

/// Hash-map backed source grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseGrid {
    values: HashMap<CellId, i32>,
}

impl SparseGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint a value, returning the previous one
    pub fn set(&mut self, cell: CellId, value: i32) -> Option<i32> {
        self.values.insert(cell, value)
    }

    /// Erase a cell, returning its value
    pub fn erase(&mut self, cell: CellId) -> Option<i32> {
        self.values.remove(&cell)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no cell is populated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Erase every cell
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl SourceGrid for SparseGrid {
    fn get(&self, cell: CellId) -> Option<i32> {
        self.values.get(&cell).copied()
    }

    fn cells(&self) -> impl Iterator<Item = (CellId, i32)> + '_ {
        self.values.iter().map(|(&cell, &value)| (cell, value))
    }
}

impl FromIterator<(CellId, i32)> for SparseGrid {
    fn from_iter<I: IntoIterator<Item = (CellId, i32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(CellId, i32)> for SparseGrid {
    fn extend<I: IntoIterator<Item = (CellId, i32)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// Ordered tile layer keyed by cell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileLayer {
    tiles: BTreeMap<CellId, (i32, Orientation)>,
}

impl TileLayer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile and orientation at `cell`
    pub fn get(&self, cell: CellId) -> Option<(i32, Orientation)> {
        self.tiles.get(&cell).copied()
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is placed
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placements in cell order
    pub fn iter(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        self.tiles
            .iter()
            .map(|(&cell, &(tile, orientation))| TilePlacement {
                cell,
                tile,
                orientation,
            })
    }

    /// Placements in cell order, collected
    pub fn placements(&self) -> Vec<TilePlacement> {
        self.iter().collect()
    }
}

impl PresentationGrid for TileLayer {
    fn clear(&mut self) {
        self.tiles.clear();
    }

    fn set_cells(&mut self, placements: &[TilePlacement]) {
        self.tiles.extend(
            placements
                .iter()
                .map(|placement| (placement.cell, (placement.tile, placement.orientation))),
        );
    }
}

impl PresentationGrid for Vec<TilePlacement> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn set_cells(&mut self, placements: &[TilePlacement]) {
        self.extend_from_slice(placements);
    }
}
