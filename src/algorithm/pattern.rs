//! Fixed 35-slot neighbourhood footprint shared by every rule
//!
//! Slot layout:
//! - `0..5`: the vertical axis, centre then `+1`, `-1`, `+2`, `-2`
//! - `5..11`: ring 1 on the centre layer
//! - `11..23`: ring 2 on the centre layer
//! - `23..29`: ring 1 one layer up
//! - `29..35`: ring 1 one layer down
//!
//! Ring members are ordered so that one rotation step advances ring 1 by one
//! slot and ring 2 by two slots.

use std::sync::LazyLock;

use crate::io::configuration::{ON_AXIS_SLOTS, PATTERN_SIZE, ROTATIONS};
use crate::spatial::CellId;

/// Classification a rule applies to one neighbourhood slot
///
/// Emptiness is the absence of a value, not a reserved number: a cell painted
/// with `-1` is populated like any other, so `Type(-1)` can match it and
/// `Empty` cannot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Slot is ignored
    #[default]
    Disabled,
    /// Neighbour must hold no value
    Empty,
    /// Neighbour must hold some value
    NotEmpty,
    /// Neighbour must hold exactly this value
    Type(i32),
    /// Neighbour must not hold this value; an empty neighbour passes
    NotType(i32),
    /// Slot came from a malformed record; rules holding one are never applied
    Invalid,
}

impl CellState {
    /// Whether the slot takes part in matching
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Whether a populated neighbour can satisfy or constrain this slot,
    /// which makes it usable for sizing a search pad
    pub const fn anchors_search(self) -> bool {
        matches!(self, Self::NotEmpty | Self::Type(_) | Self::NotType(_))
    }

    /// Test a fetched neighbour value against this slot
    pub const fn accepts(self, value: Option<i32>) -> bool {
        match (self, value) {
            (Self::Disabled | Self::Invalid, _) => true,
            (Self::Empty, value) => value.is_none(),
            (Self::NotEmpty, value) => value.is_some(),
            (Self::Type(expected), Some(actual)) => expected == actual,
            (Self::Type(_), None) => false,
            (Self::NotType(excluded), Some(actual)) => excluded != actual,
            (Self::NotType(_), None) => true,
        }
    }
}

/// A run of slots that rotate together
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRing {
    /// First slot index in the ring
    pub first: usize,
    /// Number of slots in the ring
    pub len: usize,
    /// Vertical offset of the ring relative to the centre
    pub layer: i32,
    /// Planar hex distance of every ring member from the axis
    pub radius: u32,
}

impl SlotRing {
    /// Slot indices covered by this ring
    pub const fn slots(&self) -> std::ops::Range<usize> {
        self.first..self.first + self.len
    }

    /// Whether `slot` belongs to this ring
    pub const fn contains(&self, slot: usize) -> bool {
        slot >= self.first && slot < self.first + self.len
    }
}

/// The four rotating rings of the footprint
pub static SLOT_RINGS: [SlotRing; 4] = [
    SlotRing {
        first: 5,
        len: 6,
        layer: 0,
        radius: 1,
    },
    SlotRing {
        first: 11,
        len: 12,
        layer: 0,
        radius: 2,
    },
    SlotRing {
        first: 23,
        len: 6,
        layer: 1,
        radius: 1,
    },
    SlotRing {
        first: 29,
        len: 6,
        layer: -1,
        radius: 1,
    },
];

/// Offset of every slot relative to the evaluation cell
pub const PATTERN_OFFSETS: [CellId; PATTERN_SIZE] = [
    // Vertical axis
    CellId::new(0, 0, 0),
    CellId::new(0, 0, 1),
    CellId::new(0, 0, -1),
    CellId::new(0, 0, 2),
    CellId::new(0, 0, -2),
    // Ring 1, centre layer
    CellId::new(1, 0, 0),
    CellId::new(0, 1, 0),
    CellId::new(-1, 1, 0),
    CellId::new(-1, 0, 0),
    CellId::new(0, -1, 0),
    CellId::new(1, -1, 0),
    // Ring 2, centre layer: corner then edge for each direction
    CellId::new(2, 0, 0),
    CellId::new(1, 1, 0),
    CellId::new(0, 2, 0),
    CellId::new(-1, 2, 0),
    CellId::new(-2, 2, 0),
    CellId::new(-2, 1, 0),
    CellId::new(-2, 0, 0),
    CellId::new(-1, -1, 0),
    CellId::new(0, -2, 0),
    CellId::new(1, -2, 0),
    CellId::new(2, -2, 0),
    CellId::new(2, -1, 0),
    // Ring 1, layer above
    CellId::new(1, 0, 1),
    CellId::new(0, 1, 1),
    CellId::new(-1, 1, 1),
    CellId::new(-1, 0, 1),
    CellId::new(0, -1, 1),
    CellId::new(1, -1, 1),
    // Ring 1, layer below
    CellId::new(1, 0, -1),
    CellId::new(0, 1, -1),
    CellId::new(-1, 1, -1),
    CellId::new(-1, 0, -1),
    CellId::new(0, -1, -1),
    CellId::new(1, -1, -1),
];

/// Slot index of a relative offset, if it lies within the footprint
pub fn get_pattern_index(offset: CellId) -> Option<usize> {
    PATTERN_OFFSETS.iter().position(|&slot| slot == offset)
}

/// Offset of a slot
pub fn slot_offset(slot: usize) -> Option<CellId> {
    PATTERN_OFFSETS.get(slot).copied()
}

/// Ring containing `slot`; `None` for the on-axis slots
pub fn ring_of(slot: usize) -> Option<&'static SlotRing> {
    if slot < ON_AXIS_SLOTS {
        return None;
    }
    SLOT_RINGS.iter().find(|ring| ring.contains(slot))
}

/// Per-rotation slot permutations
///
/// Entry `[k][slot]` is the slot whose offset equals `slot`'s offset rotated
/// by `k` steps. Matching compares pattern slot `slot` against the neighbour
/// fetched at that rotated slot.
static ROTATION_TABLES: LazyLock<[[usize; PATTERN_SIZE]; ROTATIONS]> = LazyLock::new(|| {
    let mut tables = [[0; PATTERN_SIZE]; ROTATIONS];
    for (steps, table) in (0i32..).zip(tables.iter_mut()) {
        for (slot, (target, offset)) in table.iter_mut().zip(PATTERN_OFFSETS.iter()).enumerate() {
            *target = get_pattern_index(offset.rotate(steps, CellId::ZERO)).unwrap_or(slot);
        }
    }
    tables
});

/// All rotation permutations, indexed by rotation step
pub fn rotation_tables() -> &'static [[usize; PATTERN_SIZE]; ROTATIONS] {
    &ROTATION_TABLES
}
