//! Board cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the board.
///
/// Serialised as an `[x, y]` pair, the form the game uses for locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u16; 2]", into = "[u16; 2]")]
pub struct Cell {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row), counted from this side's back edge.
    pub y: u16,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<[u16; 2]> for Cell {
    fn from([x, y]: [u16; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for [u16; 2] {
    fn from(cell: Cell) -> Self {
        [cell.x, cell.y]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_serializes_as_pair() {
        let json = serde_json::to_string(&Cell::new(8, 5)).unwrap();
        assert_eq!(json, "[8,5]");
        let cell: Cell = serde_json::from_str("[19,5]").unwrap();
        assert_eq!(cell, Cell::new(19, 5));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(3, 11).to_string(), "(3, 11)");
    }
}
