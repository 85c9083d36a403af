//! Static Grid - fixed-size cell grid indexing the static items by box.
//!
//! An item is stored in every cell its box overlaps. Boxes reaching out of
//! the world are clamped on the border cells, so they stay reachable.

use crate::core::Rect;
use crate::domain::ItemId;

/// Cell side, in world units
pub const DEFAULT_CELL_SIZE: u32 = 256;

pub struct StaticGrid {
    cell_size: f64,
    cells_x: u32,
    cells_y: u32,
    cells: Vec<Vec<ItemId>>,
    item_count: usize,
}

impl StaticGrid {
    /// Create a grid covering a world of the given size
    pub fn new(width: f64, height: f64, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let side = cell_size as f64;
        let cells_x = ((width.max(0.0) / side).ceil() as u32).max(1);
        let cells_y = ((height.max(0.0) / side).ceil() as u32).max(1);

        Self {
            cell_size: side,
            cells_x,
            cells_y,
            cells: vec![Vec::new(); cells_x as usize * cells_y as usize],
            item_count: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.cells_x, self.cells_y)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn len(&self) -> usize {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn insert(&mut self, id: ItemId, bounding_box: &Rect) {
        for idx in self.cell_indices(bounding_box) {
            self.cells[idx].push(id);
        }
        self.item_count += 1;
    }

    /// Removes `id` from the cells covered by `bounding_box`, the box it was
    /// inserted with
    pub fn remove(&mut self, id: ItemId, bounding_box: &Rect) -> bool {
        let mut found = false;
        for idx in self.cell_indices(bounding_box) {
            let cell = &mut self.cells[idx];
            if let Some(pos) = cell.iter().position(|i| *i == id) {
                cell.swap_remove(pos);
                found = true;
            }
        }

        if found {
            self.item_count -= 1;
        }
        found
    }

    /// Items stored in the cells covered by `area`, each reported once, in
    /// key order. The caller checks the actual boxes.
    pub fn query(&self, area: &Rect, out: &mut Vec<ItemId>) {
        let start = out.len();
        for idx in self.cell_indices(area) {
            out.extend_from_slice(&self.cells[idx]);
        }

        out[start..].sort_unstable();
        let mut unique = out.split_off(start);
        unique.dedup();
        out.extend(unique);
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.item_count = 0;
    }

    #[inline]
    fn cell_coord(&self, v: f64, count: u32) -> u32 {
        let c = (v / self.cell_size).floor();
        if c <= 0.0 {
            0
        } else {
            (c as u32).min(count - 1)
        }
    }

    fn cell_indices(&self, r: &Rect) -> impl Iterator<Item = usize> {
        let x0 = self.cell_coord(r.left, self.cells_x);
        let x1 = self.cell_coord(r.right(), self.cells_x);
        let y0 = self.cell_coord(r.bottom, self.cells_y);
        let y1 = self.cell_coord(r.top(), self.cells_y);
        let cells_x = self.cells_x;

        (y0..=y1).flat_map(move |cy| (x0..=x1).map(move |cx| cell_index(cx, cy, cells_x)))
    }
}

/// Flat index of a cell, computed in `usize` so that wide grids do not
/// overflow
#[inline]
fn cell_index(cx: u32, cy: u32, cells_x: u32) -> usize {
    cy as usize * cells_x as usize + cx as usize
}
