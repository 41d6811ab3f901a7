//! Iteration over every cell overlapping a box in continuous space

use glam::Vec3;

use crate::spatial::cell::{CellId, OffsetCoord};

/// Inclusive column span for rows of one parity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnSpan {
    first: i32,
    last: i32,
}

/// Walks the odd-row offset rectangle covering an axis-aligned box
///
/// Rows sharing the parity of a corner's containing cell start (or end) at
/// that cell's column. Rows of the other parity are shifted half a cell, so
/// their boundary column depends on which side of the containing cell's
/// centre the corner fell.
///
/// Rows are limited to those of the two corner cells. The pointed tip of a
/// hex in the row just outside that range can still reach into the box; such
/// cells are not visited.
#[derive(Clone, Debug)]
pub struct VolumeIter {
    even: ColumnSpan,
    odd: ColumnSpan,
    rows: (i32, i32),
    layers: (i32, i32),
    cursor: Option<OffsetCoord>,
    end: OffsetCoord,
}

impl VolumeIter {
    /// Create an iterator over cells overlapping the box spanned by two corners
    pub fn new(a: Vec3, b: Vec3) -> Self {
        let low = a.min(b);
        let high = a.max(b);

        let low_cell = CellId::from_point(low).clamp_to_bounds();
        let high_cell = CellId::from_point(high).clamp_to_bounds();

        let (even_first, odd_first) = boundary_columns(low_cell, low.x);
        let (even_last, odd_last) = boundary_columns(high_cell, high.x);

        let low_offset = low_cell.to_offset();
        let high_offset = high_cell.to_offset();

        let mut iter = Self {
            even: ColumnSpan {
                first: even_first,
                last: even_last,
            },
            odd: ColumnSpan {
                first: odd_first,
                last: odd_last,
            },
            rows: (
                low_offset.row.min(high_offset.row),
                low_offset.row.max(high_offset.row),
            ),
            layers: (low_cell.y, high_cell.y),
            cursor: None,
            end: OffsetCoord::default(),
        };
        iter.end = iter.last_position().unwrap_or_default();
        iter.reset();
        iter
    }

    /// Rewind to the first cell
    pub fn reset(&mut self) {
        self.cursor = self.first_from(self.layers.0, self.rows.0);
    }

    const fn span(&self, row: i32) -> ColumnSpan {
        if row & 1 == 1 { self.odd } else { self.even }
    }

    /// First position at or after (`y`, `row`) whose row has columns
    fn first_from(&self, y: i32, row: i32) -> Option<OffsetCoord> {
        (y..=self.layers.1)
            .flat_map(|layer| {
                let first_row = if layer == y { row } else { self.rows.0 };
                (first_row..=self.rows.1).map(move |row| (layer, row))
            })
            .find_map(|(layer, row)| {
                let span = self.span(row);
                (span.first <= span.last).then_some(OffsetCoord::new(span.first, row, layer))
            })
    }

    fn last_position(&self) -> Option<OffsetCoord> {
        (self.rows.0..=self.rows.1).rev().find_map(|row| {
            let span = self.span(row);
            (span.first <= span.last).then_some(OffsetCoord::new(span.last, row, self.layers.1))
        })
    }

    fn advance(&self, position: OffsetCoord) -> Option<OffsetCoord> {
        if position == self.end {
            return None;
        }
        if position.col < self.span(position.row).last {
            return Some(OffsetCoord::new(
                position.col + 1,
                position.row,
                position.y,
            ));
        }
        if position.row < self.rows.1 {
            self.first_from(position.y, position.row + 1)
        } else if position.y < self.layers.1 {
            self.first_from(position.y + 1, self.rows.0)
        } else {
            None
        }
    }
}

impl Iterator for VolumeIter {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        loop {
            let position = self.cursor?;
            self.cursor = self.advance(position);
            let cell = CellId::from_offset(position);
            if cell.in_bounds() {
                return Some(cell);
            }
        }
    }
}

/// Columns in even and odd rows whose footprint contains `x`
///
/// `cell` is the cell containing the corner. Rows of its own parity reuse its
/// column; the neighbouring parity straddles it half a cell to either side.
fn boundary_columns(cell: CellId, x: f32) -> (i32, i32) {
    let offset = cell.to_offset();
    let left_of_center = x < cell.unit_center().x;
    let other = match (offset.is_odd_row(), left_of_center) {
        // Odd rows sit half a cell to the right of even rows
        (false, true) => offset.col - 1,
        (false, false) | (true, true) => offset.col,
        (true, false) => offset.col + 1,
    };
    if offset.is_odd_row() {
        (other, offset.col)
    } else {
        (offset.col, other)
    }
}
