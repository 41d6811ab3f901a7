//! Bounded iteration over hex regions
//!
//! [`AxialIter`] walks the cube-coordinate bounding box around a centre and
//! yields a rhombic or hexagonal prism depending on which planes constrain
//! it. [`RadialIter`] narrows that to true hex distance. Both clamp their
//! bounds into the 16-bit evaluation range, so any centre or radius produces
//! a finite (possibly empty) sequence.

use std::ops::BitOr;

use crate::io::configuration::{CELL_COORD_MAX, CELL_COORD_MIN};
use crate::spatial::cell::CellId;

/// Set of axes that bound an [`AxialIter`]
///
/// A bounded `y`, `q` or `r` axis spans `center ± radius`; an unbounded one
/// stays at the centre's value. A bounded `s` axis filters generated cells to
/// `center.s() ± radius`; leaving it unbounded applies no filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Planes(u8);

impl Planes {
    /// Vertical axis
    pub const Y: Self = Self(0b0001);
    /// Axial `q`
    pub const Q: Self = Self(0b0010);
    /// Axial `r`
    pub const R: Self = Self(0b0100);
    /// Derived `s`
    pub const S: Self = Self(0b1000);
    /// Single horizontal layer, hexagonal footprint
    pub const HORIZONTAL: Self = Self(0b1110);
    /// Hexagonal prism across layers
    pub const ALL: Self = Self(0b1111);

    /// Whether every axis of `other` is also in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Planes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Inclusive span of one axis, trimmed to the evaluation range
///
/// `None` when nothing of the span lies inside that range.
fn axis_span(center: i32, radius: u32, bounded: bool) -> Option<(i32, i32)> {
    let reach = if bounded { i64::from(radius) } else { 0 };
    let low = (i64::from(center) - reach).max(i64::from(CELL_COORD_MIN));
    let high = (i64::from(center) + reach).min(i64::from(CELL_COORD_MAX));
    if low > high {
        return None;
    }
    Some((i32::try_from(low).ok()?, i32::try_from(high).ok()?))
}

/// Lazy walk over the cube-coordinate box around a centre
///
/// Visits `r` fastest, then `q`, then `y`. Cells whose derived `s` falls
/// outside its span are skipped.
#[derive(Clone, Debug)]
pub struct AxialIter {
    min: CellId,
    max: CellId,
    s_span: (i64, i64),
    start: Option<CellId>,
    cursor: Option<CellId>,
}

impl AxialIter {
    /// Create an iterator over the box of `radius` around `center`
    pub fn new(center: CellId, radius: u32, planes: Planes) -> Self {
        let q_span = axis_span(center.q, radius, planes.contains(Planes::Q));
        let r_span = axis_span(center.r, radius, planes.contains(Planes::R));
        let y_span = axis_span(center.y, radius, planes.contains(Planes::Y));

        let s_span = if planes.contains(Planes::S) {
            let s = -i64::from(center.q) - i64::from(center.r);
            (s - i64::from(radius), s + i64::from(radius))
        } else {
            (i64::MIN, i64::MAX)
        };

        let (min, max) = match (q_span, r_span, y_span) {
            (Some((q_lo, q_hi)), Some((r_lo, r_hi)), Some((y_lo, y_hi))) => (
                CellId::new(q_lo, r_lo, y_lo),
                CellId::new(q_hi, r_hi, y_hi),
            ),
            _ => (CellId::INVALID, CellId::INVALID),
        };
        let start = (min != CellId::INVALID).then_some(min);

        Self {
            min,
            max,
            s_span,
            start,
            cursor: start,
        }
    }

    /// Rewind to the first cell
    pub const fn reset(&mut self) {
        self.cursor = self.start;
    }

    const fn step(&self, cell: CellId) -> Option<CellId> {
        if cell.r < self.max.r {
            Some(CellId::new(cell.q, cell.r + 1, cell.y))
        } else if cell.q < self.max.q {
            Some(CellId::new(cell.q + 1, self.min.r, cell.y))
        } else if cell.y < self.max.y {
            Some(CellId::new(self.min.q, self.min.r, cell.y + 1))
        } else {
            None
        }
    }

    fn accepts(&self, cell: CellId) -> bool {
        let s = -i64::from(cell.q) - i64::from(cell.r);
        s >= self.s_span.0 && s <= self.s_span.1 && cell.in_bounds()
    }
}

impl Iterator for AxialIter {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        loop {
            let cell = self.cursor?;
            self.cursor = self.step(cell);
            if self.accepts(cell) {
                return Some(cell);
            }
        }
    }
}

/// Cells within true hex distance of a centre
#[derive(Clone, Debug)]
pub struct RadialIter {
    center: CellId,
    radius: u32,
    exclude_center: bool,
    inner: AxialIter,
}

impl RadialIter {
    /// Create an iterator over every cell within `radius` of `center`
    pub fn new(center: CellId, radius: u32, planes: Planes) -> Self {
        Self {
            center,
            radius,
            exclude_center: false,
            inner: AxialIter::new(center, radius, planes),
        }
    }

    /// Skip the centre cell itself
    #[must_use]
    pub const fn exclude_center(mut self) -> Self {
        self.exclude_center = true;
        self
    }

    /// Rewind to the first cell
    pub const fn reset(&mut self) {
        self.inner.reset();
    }
}

impl Iterator for RadialIter {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        let center = self.center;
        let radius = self.radius;
        let exclude_center = self.exclude_center;
        self.inner.find(|&cell| {
            center.distance(cell) <= radius && !(exclude_center && cell == center)
        })
    }
}
