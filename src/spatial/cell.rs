//! Axial hexagonal cell coordinates with an independent vertical axis
//!
//! Cells are pointy-top hexagons of unit radius and unit height. The planar
//! axes `q` and `r` are stored; `s = -q - r` is always derived. Continuous
//! space uses `x`/`z` for the horizontal plane and `y` for height, so a cell's
//! centre sits at `y = cell.y`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::io::configuration::{CELL_COORD_MAX, CELL_COORD_MIN};
use crate::io::error::{TileError, invalid_parameter};

const SQRT_3: f32 = 1.732_050_8;

/// One hex cell at one vertical level
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct CellId {
    /// Axial column axis
    pub q: i32,
    /// Axial row axis
    pub r: i32,
    /// Vertical level
    pub y: i32,
}

/// Odd-row offset coordinates, odd rows shifted half a cell towards `+x`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetCoord {
    /// Column within the row
    pub col: i32,
    /// Row, identical to the axial `r`
    pub row: i32,
    /// Vertical level
    pub y: i32,
}

impl CellId {
    /// The origin cell
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Sentinel for "no cell"; never [`in_bounds`](Self::in_bounds)
    pub const INVALID: Self = Self::new(i32::MAX, i32::MAX, i32::MAX);

    /// One level up
    pub const UP: Self = Self::new(0, 0, 1);

    /// One level down
    pub const DOWN: Self = Self::new(0, 0, -1);

    /// Horizontal unit offsets, ordered so that [`rotate`](Self::rotate) by
    /// one step maps entry `i` onto entry `i + 1`
    pub const DIRECTIONS: [Self; 6] = [
        Self::new(1, 0, 0),
        Self::new(0, 1, 0),
        Self::new(-1, 1, 0),
        Self::new(-1, 0, 0),
        Self::new(0, -1, 0),
        Self::new(1, -1, 0),
    ];

    /// Create a cell from axial `q`, `r` and level `y`
    pub const fn new(q: i32, r: i32, y: i32) -> Self {
        Self { q, r, y }
    }

    /// Derived third cube coordinate
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Whether every axis fits the signed 16-bit evaluation range
    pub const fn in_bounds(self) -> bool {
        self.q >= CELL_COORD_MIN
            && self.q <= CELL_COORD_MAX
            && self.r >= CELL_COORD_MIN
            && self.r <= CELL_COORD_MAX
            && self.y >= CELL_COORD_MIN
            && self.y <= CELL_COORD_MAX
    }

    /// Hex distance in the plane plus vertical distance
    ///
    /// Planar and vertical movement are never combined diagonally, so the two
    /// components add. Saturates instead of overflowing for cells outside the
    /// 16-bit range.
    pub fn distance(self, other: Self) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let dy = i64::from(self.y) - i64::from(other.y);
        let planar = (dq.abs() + (dq + dr).abs() + dr.abs()) / 2;
        u32::try_from(planar + dy.abs()).unwrap_or(u32::MAX)
    }

    /// Rotate by `steps` sixths of a turn about the vertical axis through `center`
    ///
    /// A single step maps cube `(q, r, s)` onto `(-r, -s, -q)`. Negative steps
    /// rotate the other way.
    #[must_use]
    pub fn rotate(self, steps: i32, center: Self) -> Self {
        let rel = self - center;
        let (q, r) = match steps.rem_euclid(6) {
            0 => (rel.q, rel.r),
            1 => (-rel.r, rel.q + rel.r),
            2 => (rel.s(), rel.q),
            3 => (-rel.q, -rel.r),
            4 => (rel.r, rel.s()),
            _ => (rel.q + rel.r, -rel.q),
        };
        Self::new(q, r, rel.y) + center
    }

    /// Clamp every axis into the 16-bit evaluation range
    #[must_use]
    pub const fn clamp_to_bounds(self) -> Self {
        Self::new(clamp_axis(self.q), clamp_axis(self.r), clamp_axis(self.y))
    }

    /// Horizontal neighbour in one of the six [`DIRECTIONS`](Self::DIRECTIONS)
    #[must_use]
    pub fn neighbor(self, direction: usize) -> Self {
        Self::DIRECTIONS
            .get(direction % Self::DIRECTIONS.len())
            .map_or(self, |&offset| self + offset)
    }

    /// Convert to odd-row offset coordinates
    pub const fn to_offset(self) -> OffsetCoord {
        OffsetCoord {
            col: self.q + (self.r - (self.r & 1)) / 2,
            row: self.r,
            y: self.y,
        }
    }

    /// Convert from odd-row offset coordinates
    pub const fn from_offset(offset: OffsetCoord) -> Self {
        Self::new(
            offset.col - (offset.row - (offset.row & 1)) / 2,
            offset.row,
            offset.y,
        )
    }

    /// Centre of this cell in continuous space for unit radius and height
    pub fn unit_center(self) -> Vec3 {
        let q = self.q as f32;
        let r = self.r as f32;
        Vec3::new(SQRT_3 * (q + r * 0.5), self.y as f32, 1.5 * r)
    }

    /// Cell containing a point in continuous space
    ///
    /// Rounds `q` and `r` independently, then re-derives whichever axis
    /// carried the larger rounding error from the other's remainder. This
    /// keeps `q + r + s = 0` exact without rounding `s` at all.
    pub fn from_point(point: Vec3) -> Self {
        let q_frac = (SQRT_3 / 3.0).mul_add(point.x, -point.z / 3.0);
        let r_frac = 2.0 / 3.0 * point.z;

        let q_grid = q_frac.round();
        let r_grid = r_frac.round();
        let q_rem = q_frac - q_grid;
        let r_rem = r_frac - r_grid;

        let (q, r) = if q_rem.abs() >= r_rem.abs() {
            (q_grid + 0.5f32.mul_add(r_rem, q_rem).round(), r_grid)
        } else {
            (q_grid, r_grid + 0.5f32.mul_add(q_rem, r_rem).round())
        };

        Self::new(q as i32, r as i32, point.y.round() as i32)
    }
}

const fn clamp_axis(value: i32) -> i32 {
    if value < CELL_COORD_MIN {
        CELL_COORD_MIN
    } else if value > CELL_COORD_MAX {
        CELL_COORD_MAX
    } else {
        value
    }
}

impl OffsetCoord {
    /// Create offset coordinates
    pub const fn new(col: i32, row: i32, y: i32) -> Self {
        Self { col, row, y }
    }

    /// Whether this row is shifted half a cell towards `+x`
    pub const fn is_odd_row(self) -> bool {
        self.row & 1 == 1
    }
}

impl Add for CellId {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r, self.y + rhs.y)
    }
}

impl Sub for CellId {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r, self.y - rhs.y)
    }
}

impl Neg for CellId {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.q, -self.r, -self.y)
    }
}

impl Mul<i32> for CellId {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.q * rhs, self.r * rhs, self.y * rhs)
    }
}

impl From<[i32; 3]> for CellId {
    fn from([q, r, y]: [i32; 3]) -> Self {
        Self::new(q, r, y)
    }
}

impl From<CellId> for [i32; 3] {
    fn from(cell: CellId) -> Self {
        [cell.q, cell.r, cell.y]
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.y)
    }
}

impl FromStr for CellId {
    type Err = TileError;

    /// Parses `q,r,y`, optionally wrapped in parentheses
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let inner = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');

        let mut axes = [0i32; 3];
        let mut parts = inner.split(',');
        for axis in &mut axes {
            *axis = parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(|| invalid_parameter("cell", &text, &"expected `q,r,y`"))?;
        }
        if parts.next().is_some() {
            return Err(invalid_parameter("cell", &text, &"expected exactly three axes"));
        }

        Ok(Self::from(axes))
    }
}
