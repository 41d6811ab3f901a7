//! Scene files read and written by the command-line tool
//!
//! A scene holds painted cells and the rules to apply to them:
//!
//! ```json
//! {
//!   "cells": [{ "cell": [0, 0, 0], "value": 3 }],
//!   "rules": [{ "id": 1, "tile": 7, "cells": { "(0, 0, 0)": { "state": "type", "type": 3 } } }]
//! }
//! ```
//!
//! The tool answers with `{ "tiles": [{ "cell": [q, r, y], "tile": t, "orientation": o }] }`.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::algorithm::ruleset::RuleSet;
use crate::io::error::{Result, TileError};
use crate::io::rules::RuleRecord;
use crate::spatial::{CellId, SourceGrid, SparseGrid, TileLayer, TilePlacement};

/// One painted cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Cell position
    pub cell: CellId,
    /// Painted value
    pub value: i32,
}

/// Painted cells plus the rules that tile them
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Painted cells; a repeated cell keeps its last value
    #[serde(default)]
    pub cells: Vec<CellEntry>,
    /// Rules in priority order
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl Scene {
    /// Capture a grid and rule set, cells sorted by position
    pub fn from_parts<S: SourceGrid>(source: &S, rules: &RuleSet) -> Self {
        let mut cells: Vec<CellEntry> = source
            .cells()
            .map(|(cell, value)| CellEntry { cell, value })
            .collect();
        cells.sort_unstable_by_key(|entry| entry.cell);

        Self {
            cells,
            rules: rules.to_records(),
        }
    }

    /// Load a scene from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scene
    pub fn from_path(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Write this scene as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }

    /// Painted cells as a source grid
    pub fn source_grid(&self) -> SparseGrid {
        self.cells
            .iter()
            .map(|entry| (entry.cell, entry.value))
            .collect()
    }

    /// Rules as a rule set, damaged records degraded as on any load
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_records(self.rules.clone())
    }
}

/// Tiles produced for one scene
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOutput {
    /// Placements in cell order
    pub tiles: Vec<TilePlacement>,
}

impl TileOutput {
    /// Capture every placement of a tile layer
    pub fn from_layer(layer: &TileLayer) -> Self {
        Self {
            tiles: layer.placements(),
        }
    }

    /// Load previously written tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Write the tiles as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| TileError::FileSystem {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| TileError::SceneParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| TileError::SceneParse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| TileError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    fs::write(path, text).map_err(|source| TileError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source,
    })
}
