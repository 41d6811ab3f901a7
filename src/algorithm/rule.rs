//! A single auto-tiling rule: a classified neighbourhood plus its output tile
//!
//! The pattern is private so every edit goes through a method that re-derives
//! the cached [`Dependencies`] before the rule can be matched again.

use crate::algorithm::bitset::DependencyMask;
use crate::algorithm::pattern::{
    CellState, PATTERN_OFFSETS, get_pattern_index, ring_of, rotation_tables, slot_offset,
};
use crate::io::configuration::{
    MAX_LAYER_OFFSET, MAX_SEARCH_RADIUS, ON_AXIS_SLOTS, PATTERN_SIZE,
};
use crate::io::error::{Result, TileError, invalid_parameter};
use crate::spatial::{CellId, Orientation};

/// Rule identifier
pub type RuleId = u16;

/// Neighbour values fetched for one evaluation cell, indexed by slot
///
/// `None` means the neighbour holds no value or was not fetched.
pub type Neighborhood = [Option<i32>; PATTERN_SIZE];

/// Where the engine must look around populated cells for empty-centre matches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchPad {
    /// Vertical offset of the anchoring slot; candidates sit `layer` below
    /// each populated cell
    pub layer: i32,
    /// Planar radius around the shifted cell to search
    pub radius: u32,
}

impl SearchPad {
    /// Pad implied by a populated neighbour at `slot`
    ///
    /// `None` for slots outside the footprint. Every pad stays within
    /// [`MAX_SEARCH_RADIUS`] and [`MAX_LAYER_OFFSET`].
    pub fn for_slot(slot: usize) -> Option<Self> {
        let offset = slot_offset(slot)?;
        let pad = Self {
            layer: offset.y,
            radius: offset.distance(CellId::new(0, 0, offset.y)),
        };
        (pad.radius <= MAX_SEARCH_RADIUS && pad.layer.abs() <= MAX_LAYER_OFFSET).then_some(pad)
    }
}

/// Values derived from a pattern, never edited directly
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependencies {
    /// Slots that must be fetched, whole rings at a time
    pub mask: DependencyMask,
    /// One past the highest enabled slot; matching stops there
    pub visit_len: usize,
    /// Empty-centre search extent, only present when slot 0 is `Empty`
    pub pad: Option<SearchPad>,
}

/// Derive the fetch mask, visit bound and search pad of a pattern
///
/// The pad is sized from the first populated-anchoring slot only, even when
/// later slots would need a wider search.
pub fn derive(pattern: &[CellState; PATTERN_SIZE]) -> Dependencies {
    let mut mask = DependencyMask::new();
    let mut visit_len = 0;

    for (slot, state) in pattern.iter().enumerate() {
        if !state.is_enabled() {
            continue;
        }
        visit_len = slot + 1;
        match ring_of(slot) {
            Some(ring) => mask.mark_ring(ring),
            None => mask.mark_slot(slot),
        }
    }

    let pad = if pattern.first() == Some(&CellState::Empty) {
        pattern
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, state)| state.anchors_search())
            .and_then(|(slot, _)| SearchPad::for_slot(slot))
    } else {
        None
    };

    Dependencies {
        mask,
        visit_len,
        pad,
    }
}

/// Neighbourhood pattern mapped to an output tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Unique id within a rule set, or [`Rule::ID_NOT_SET`]
    pub id: RuleId,
    /// Tile emitted where this rule matches
    pub tile: i32,
    /// Disabled rules are skipped by the engine
    pub enabled: bool,
    pattern: [CellState; PATTERN_SIZE],
    dependencies: Dependencies,
}

impl Rule {
    /// Id placeholder; adding such a rule allocates the next free id
    pub const ID_NOT_SET: RuleId = RuleId::MAX;

    /// Create an enabled rule with every slot disabled
    pub fn new(tile: i32) -> Self {
        let pattern = [CellState::Disabled; PATTERN_SIZE];
        Self {
            id: Self::ID_NOT_SET,
            tile,
            enabled: true,
            dependencies: derive(&pattern),
            pattern,
        }
    }

    /// Same rule with an explicit id
    #[must_use]
    pub const fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    /// Same rule with one more classified cell
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidOffset`] if `offset` is outside the footprint
    pub fn with_cell(mut self, offset: CellId, state: CellState) -> Result<Self> {
        self.set_cell(offset, state)?;
        Ok(self)
    }

    /// Classify the neighbour at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidOffset`] if `offset` is outside the
    /// footprint; the pattern is left unchanged.
    pub fn set_cell(&mut self, offset: CellId, state: CellState) -> Result<()> {
        let slot = get_pattern_index(offset).ok_or(TileError::InvalidOffset { offset })?;
        self.set_slot(slot, state)
    }

    /// Classify a slot by index
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `slot` is not below the pattern size
    pub fn set_slot(&mut self, slot: usize, state: CellState) -> Result<()> {
        let entry = self
            .pattern
            .get_mut(slot)
            .ok_or_else(|| invalid_parameter("slot", &slot, &"pattern has 35 slots"))?;
        *entry = state;
        self.dependencies = derive(&self.pattern);
        Ok(())
    }

    /// Reset the neighbour at `offset` to disabled
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidOffset`] if `offset` is outside the footprint
    pub fn clear_cell(&mut self, offset: CellId) -> Result<()> {
        self.set_cell(offset, CellState::Disabled)
    }

    /// Reset every slot to disabled
    pub fn clear_pattern(&mut self) {
        self.pattern = [CellState::Disabled; PATTERN_SIZE];
        self.dependencies = derive(&self.pattern);
    }

    /// Classification of the neighbour at `offset`
    pub fn cell(&self, offset: CellId) -> Option<CellState> {
        get_pattern_index(offset).and_then(|slot| self.slot(slot))
    }

    /// Classification of a slot
    pub fn slot(&self, slot: usize) -> Option<CellState> {
        self.pattern.get(slot).copied()
    }

    /// Full pattern in slot order
    pub const fn pattern(&self) -> &[CellState; PATTERN_SIZE] {
        &self.pattern
    }

    /// Enabled cells with their offsets
    pub fn cells(&self) -> impl Iterator<Item = (CellId, CellState)> + '_ {
        PATTERN_OFFSETS
            .iter()
            .zip(self.pattern.iter())
            .filter(|(_, state)| state.is_enabled())
            .map(|(&offset, &state)| (offset, state))
    }

    /// Cached values derived from the pattern
    pub const fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    /// Slots this rule needs fetched
    pub const fn mask(&self) -> &DependencyMask {
        &self.dependencies.mask
    }

    /// Empty-centre search extent
    pub const fn search_pad(&self) -> Option<SearchPad> {
        self.dependencies.pad
    }

    /// Whether any slot degraded to [`CellState::Invalid`]
    pub fn is_malformed(&self) -> bool {
        self.pattern.contains(&CellState::Invalid)
    }

    /// Match a neighbourhood under each upright rotation in turn
    ///
    /// Returns the first orientation under which every visited slot accepts
    /// its rotated neighbour. A mismatch on an on-axis slot cannot change
    /// with rotation and fails the whole match at once.
    pub fn matches(&self, values: &Neighborhood) -> Option<Orientation> {
        'rotations: for (orientation, table) in
            Orientation::UPRIGHT.iter().zip(rotation_tables().iter())
        {
            for (slot, (state, &target)) in self
                .pattern
                .iter()
                .zip(table.iter())
                .take(self.dependencies.visit_len)
                .enumerate()
            {
                let value = values.get(target).copied().flatten();
                if state.accepts(value) {
                    continue;
                }
                if slot < ON_AXIS_SLOTS {
                    return None;
                }
                continue 'rotations;
            }
            return Some(*orientation);
        }
        None
    }
}
