//! Discrete tile orientations: six upright rotations and their mirrored twins
//!
//! An orientation is the transform `R^steps ∘ F^flipped`: mirror first (if
//! flipped), then rotate. Composition follows the dihedral group of the
//! hexagon, so every product of orientations is again an orientation.

use std::f32::consts::FRAC_PI_3;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::error::{TileError, invalid_parameter};

/// One of twelve discrete tile orientations
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Orientation {
    /// No rotation
    #[default]
    Upright0 = 0,
    /// One rotation step
    Upright60 = 1,
    /// Two rotation steps
    Upright120 = 2,
    /// Three rotation steps
    Upright180 = 3,
    /// Four rotation steps
    Upright240 = 4,
    /// Five rotation steps
    Upright300 = 5,
    /// Mirrored, no rotation
    Flipped0 = 6,
    /// Mirrored, one rotation step
    Flipped60 = 7,
    /// Mirrored, two rotation steps
    Flipped120 = 8,
    /// Mirrored, three rotation steps
    Flipped180 = 9,
    /// Mirrored, four rotation steps
    Flipped240 = 10,
    /// Mirrored, five rotation steps
    Flipped300 = 11,
}

impl Orientation {
    /// The six upright orientations in matching order
    pub const UPRIGHT: [Self; 6] = [
        Self::Upright0,
        Self::Upright60,
        Self::Upright120,
        Self::Upright180,
        Self::Upright240,
        Self::Upright300,
    ];

    /// All twelve orientations, indexed by their serialized value
    pub const ALL: [Self; 12] = [
        Self::Upright0,
        Self::Upright60,
        Self::Upright120,
        Self::Upright180,
        Self::Upright240,
        Self::Upright300,
        Self::Flipped0,
        Self::Flipped60,
        Self::Flipped120,
        Self::Flipped180,
        Self::Flipped240,
        Self::Flipped300,
    ];

    /// Build an orientation from a rotation step count and a mirror flag
    pub fn from_parts(steps: i32, flipped: bool) -> Self {
        let rotation = steps.rem_euclid(6) as usize;
        let index = if flipped { rotation + 6 } else { rotation };
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Rotation steps in `0..6`
    pub const fn steps(self) -> u8 {
        self as u8 % 6
    }

    /// Whether the mirror is applied
    pub const fn is_flipped(self) -> bool {
        self as u8 >= 6
    }

    /// Rotate by a further `steps` sixths of a turn
    #[must_use]
    pub fn rotated(self, steps: i32) -> Self {
        Self::from_parts(i32::from(self.steps()) + steps, self.is_flipped())
    }

    /// Mirror this orientation
    ///
    /// Mirroring reverses the sense of any rotation already applied.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self::from_parts(-i32::from(self.steps()), !self.is_flipped())
    }

    /// Apply `other` first, then `self`
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        let other_steps = i32::from(other.steps());
        let carried = if self.is_flipped() {
            -other_steps
        } else {
            other_steps
        };
        Self::from_parts(
            i32::from(self.steps()) + carried,
            self.is_flipped() != other.is_flipped(),
        )
    }

    /// Inverse element, so that `o.compose(o.inverse())` is [`Orientation::Upright0`]
    #[must_use]
    pub fn inverse(self) -> Self {
        if self.is_flipped() {
            self
        } else {
            Self::from_parts(-i32::from(self.steps()), false)
        }
    }

    /// Right-handed rotation about `+Y` matching [`CellId::rotate`](crate::spatial::CellId::rotate)
    pub fn angle_radians(self) -> f32 {
        -f32::from(self.steps()) * FRAC_PI_3
    }
}

impl From<Orientation> for u8 {
    fn from(orientation: Orientation) -> Self {
        orientation as Self
    }
}

impl TryFrom<u8> for Orientation {
    type Error = TileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| invalid_parameter("orientation", &value, &"expected 0..12"))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_flipped() { "flipped" } else { "upright" };
        write!(f, "{kind} {}°", u32::from(self.steps()) * 60)
    }
}
