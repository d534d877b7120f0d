//! The playable arena.
//!
//! The game is played on a diamond inscribed in the square board. Each side
//! deploys mobile units from the two diagonal edges of its own half.

use crate::grid::{Cell, Geometry};

impl Geometry {
    /// Check if a cell lies inside the diamond-shaped playable arena.
    #[must_use]
    pub const fn in_arena(&self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }

        let half = self.half_divider;
        let (x, y) = (cell.x, cell.y);
        // `contains` bounds x and y below arena_size, so x + 1 and the
        // subtractions cannot wrap.
        if y < half {
            x + 1 >= half - y && x <= half.saturating_add(y)
        } else {
            x >= y - half && x < (self.arena_size - y).saturating_add(half)
        }
    }

    /// Check if a cell lies on one of the own half's two deployment edges.
    #[must_use]
    pub const fn is_own_edge(&self, cell: Cell) -> bool {
        let half = self.half_divider;
        self.in_arena(cell)
            && cell.y < half
            && (cell.x + 1 == half - cell.y || (cell.x >= cell.y && cell.x - cell.y == half))
    }

    /// All cells on the own half's deployment edges, left edge first.
    #[must_use]
    pub fn own_edges(&self) -> Vec<Cell> {
        let mut left: Vec<Cell> = Vec::new();
        let mut right: Vec<Cell> = Vec::new();
        for y in 0..self.half_divider {
            let left_cell = Cell::new(self.half_divider - 1 - y, y);
            let right_cell = Cell::new(self.half_divider.saturating_add(y), y);
            if self.is_own_edge(left_cell) {
                left.push(left_cell);
            }
            if self.is_own_edge(right_cell) {
                right.push(right_cell);
            }
        }
        left.extend(right);
        left
    }
}
