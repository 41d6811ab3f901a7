use bitvec::prelude::*;
use std::fmt;

use crate::algorithm::pattern::SlotRing;
use crate::io::configuration::PATTERN_SIZE;

/// Fixed-size bitset of pattern slots a rule needs fetched
///
/// Ring slots are only ever marked a whole ring at a time: rotation search
/// compares every ring member against every rotated pattern position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyMask {
    bits: BitVec,
}

impl Default for DependencyMask {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyMask {
    /// Create a mask with no slots marked
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; PATTERN_SIZE],
        }
    }

    /// Create a mask with every slot marked
    pub fn all() -> Self {
        Self {
            bits: bitvec![1; PATTERN_SIZE],
        }
    }

    /// Mark a single slot
    pub fn mark_slot(&mut self, slot: usize) {
        if slot < PATTERN_SIZE {
            self.bits.set(slot, true);
        }
    }

    /// Mark every slot of a ring
    pub fn mark_ring(&mut self, ring: &SlotRing) {
        for slot in ring.slots() {
            self.mark_slot(slot);
        }
    }

    /// Test slot membership
    pub fn contains(&self, slot: usize) -> bool {
        self.bits.get(slot).as_deref() == Some(&true)
    }

    /// Add every slot of `other` to this mask
    pub fn union_with(&mut self, other: &Self) {
        for slot in other.bits.iter_ones() {
            self.mark_slot(slot);
        }
    }

    /// Test if no slots are marked
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count marked slots
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Marked slot indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for DependencyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyMask({} slots: {:?})", self.count(), self.to_vec())
    }
}
