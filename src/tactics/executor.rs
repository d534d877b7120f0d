//! Greedy placement executor.

use crate::grid::Cell;
use crate::ledger::{PlacementOracle, ResourceLedger};
use crate::units::UnitType;

/// A unit type and the cells to try, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    /// Unit type to place.
    pub unit: UnitType,
    /// Candidate cells in priority order.
    pub cells: Vec<Cell>,
}

impl PlacementPlan {
    /// Create a new plan.
    #[must_use]
    pub fn new(unit: UnitType, cells: Vec<Cell>) -> Self {
        Self { unit, cells }
    }
}

/// Place `unit` at as many `cells` as the ledger allows, in order.
///
/// A rejected candidate (unaffordable or illegal) is skipped and the rest of
/// the list is still tried. Returns the number of units placed.
pub fn place_greedy<O: PlacementOracle>(
    ledger: &mut ResourceLedger<'_, O>,
    unit: UnitType,
    cells: &[Cell],
) -> usize {
    let mut placed = 0;
    for &cell in cells {
        if ledger.spend_and_confirm(unit, cell) {
            placed += 1;
        }
    }
    placed
}
