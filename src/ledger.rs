//! Resource ledger and placement legality.
//!
//! The ledger owns the acting side's two pool balances for one decision turn.
//! A placement only goes through when it is both affordable and legal; on
//! success the cost is deducted and the engine is asked to place the unit.
//! A rejected placement never touches the balances.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::grid::{Cell, Geometry};
use crate::snapshot::{Balances, TurnSnapshot};
use crate::units::{Pool, UnitCatalog, UnitCategory, UnitType};

/// The engine's view of which placements are legal.
pub trait PlacementOracle {
    /// Whether `unit` may be placed at `cell` in the current board state.
    fn is_legal(&self, unit: UnitType, cell: Cell) -> bool;

    /// Place `unit` at `cell`. Only called after [`PlacementOracle::is_legal`]
    /// returned `true` and the unit was paid for.
    fn place(&mut self, unit: UnitType, cell: Cell);
}

/// A placement request accepted this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    /// Placed unit type.
    pub unit: UnitType,
    /// Target cell.
    pub cell: Cell,
}

/// Counts of placement attempts turned down this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rejections {
    /// Attempts the pool could not pay for.
    pub unaffordable: usize,
    /// Affordable attempts at an illegal cell.
    pub illegal: usize,
}

/// Placement rules of the standard arena.
///
/// - Every placement must land inside the diamond arena.
/// - Structures go on the own half, one per cell.
/// - Mobile units launch from the own deployment edges; they may share a
///   cell with each other but not with a structure.
#[derive(Debug, Clone)]
pub struct ArenaBoard {
    geometry: Geometry,
    occupied: HashSet<Cell>,
    mobile: Vec<Placement>,
}

impl ArenaBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            occupied: HashSet::new(),
            mobile: Vec::new(),
        }
    }

    /// Create a board holding the structures of a snapshot.
    #[must_use]
    pub fn from_snapshot(geometry: Geometry, snapshot: &TurnSnapshot) -> Self {
        let mut board = Self::new(geometry);
        board
            .occupied
            .extend(snapshot.structures.iter().map(|unit| unit.cell));
        board
    }

    /// Check if a structure stands on a cell.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Mobile units deployed on this board, in deployment order.
    #[must_use]
    pub fn deployed_mobile(&self) -> &[Placement] {
        &self.mobile
    }
}

impl PlacementOracle for ArenaBoard {
    fn is_legal(&self, unit: UnitType, cell: Cell) -> bool {
        if !self.geometry.in_arena(cell) || self.is_occupied(cell) {
            return false;
        }
        match unit.category() {
            UnitCategory::Structure => cell.y < self.geometry.half_divider,
            UnitCategory::Mobile => self.geometry.is_own_edge(cell),
        }
    }

    fn place(&mut self, unit: UnitType, cell: Cell) {
        match unit.category() {
            UnitCategory::Structure => {
                self.occupied.insert(cell);
            }
            UnitCategory::Mobile => self.mobile.push(Placement { unit, cell }),
        }
    }
}

/// Live view over the two resource pools for one decision turn.
#[derive(Debug)]
pub struct ResourceLedger<'a, O> {
    catalog: &'a UnitCatalog,
    balances: Balances,
    oracle: &'a mut O,
    placements: Vec<Placement>,
    rejections: Rejections,
}

impl<'a, O: PlacementOracle> ResourceLedger<'a, O> {
    /// Open a ledger over the given balances.
    pub fn new(catalog: &'a UnitCatalog, balances: Balances, oracle: &'a mut O) -> Self {
        Self {
            catalog,
            balances,
            oracle,
            placements: Vec::new(),
            rejections: Rejections::default(),
        }
    }

    /// Remaining balances.
    #[must_use]
    pub const fn balances(&self) -> Balances {
        self.balances
    }

    /// Remaining balance of one pool.
    #[must_use]
    pub const fn balance(&self, pool: Pool) -> f64 {
        self.balances.get(pool)
    }

    /// Check if the unit's pool can pay for one more unit.
    #[must_use]
    pub fn can_afford(&self, unit: UnitType) -> bool {
        self.balance(unit.pool()) >= self.catalog.cost(unit)
    }

    /// How many units of this type the current balance pays for.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn number_affordable(&self, unit: UnitType) -> u32 {
        let cost = self.catalog.cost(unit);
        let balance = self.balance(unit.pool());
        if cost <= 0.0 || balance <= 0.0 {
            return 0;
        }
        (balance / cost).floor() as u32
    }

    /// Pay for and place a unit if it is affordable and legal.
    ///
    /// Returns `false` without touching the balances when either check
    /// fails.
    pub fn spend_and_confirm(&mut self, unit: UnitType, cell: Cell) -> bool {
        if !self.can_afford(unit) {
            trace!(%unit, %cell, "placement unaffordable");
            self.rejections.unaffordable += 1;
            return false;
        }
        if !self.oracle.is_legal(unit, cell) {
            trace!(%unit, %cell, "placement illegal");
            self.rejections.illegal += 1;
            return false;
        }

        self.balances.spend(unit.pool(), self.catalog.cost(unit));
        self.oracle.place(unit, cell);
        self.placements.push(Placement { unit, cell });
        trace!(%unit, %cell, "placed");
        true
    }

    /// Placements accepted so far, in request order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Attempts rejected so far.
    #[must_use]
    pub const fn rejections(&self) -> Rejections {
        self.rejections
    }

    /// Close the ledger, yielding the accepted placements.
    #[must_use]
    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Owner, Unit};

    fn board() -> ArenaBoard {
        ArenaBoard::new(Geometry::STANDARD)
    }

    #[test]
    fn test_structure_legality() {
        let board = board();
        assert!(board.is_legal(UnitType::Filter, Cell::new(3, 11)));
        assert!(board.is_legal(UnitType::Destructor, Cell::new(0, 13)));
        // Enemy half.
        assert!(!board.is_legal(UnitType::Filter, Cell::new(13, 14)));
        // Outside the diamond.
        assert!(!board.is_legal(UnitType::Filter, Cell::new(0, 0)));
    }

    #[test]
    fn test_mobile_legality() {
        let board = board();
        assert!(board.is_legal(UnitType::Emp, Cell::new(8, 5)));
        assert!(board.is_legal(UnitType::Ping, Cell::new(16, 2)));
        assert!(!board.is_legal(UnitType::Ping, Cell::new(13, 5)));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let snapshot = TurnSnapshot::new(0, Balances::default()).with_structure(Unit::new(
            UnitType::Filter,
            Owner::Me,
            Cell::new(8, 5),
            60.0,
        ));
        let board = ArenaBoard::from_snapshot(Geometry::STANDARD, &snapshot);
        assert!(board.is_occupied(Cell::new(8, 5)));
        assert!(!board.is_legal(UnitType::Destructor, Cell::new(8, 5)));
        assert!(!board.is_legal(UnitType::Emp, Cell::new(8, 5)));
    }

    #[test]
    fn test_mobile_units_share_launch_cell() {
        let catalog = UnitCatalog::default();
        let mut board = board();
        let mut ledger = ResourceLedger::new(&catalog, Balances::new(0.0, 3.0), &mut board);
        assert!(ledger.spend_and_confirm(UnitType::Ping, Cell::new(11, 2)));
        assert!(ledger.spend_and_confirm(UnitType::Ping, Cell::new(11, 2)));
        assert_eq!(ledger.placements().len(), 2);
        assert_eq!(board.deployed_mobile().len(), 2);
    }

    #[test]
    fn test_spend_deducts_matching_pool() {
        let catalog = UnitCatalog::default();
        let mut board = board();
        let mut ledger = ResourceLedger::new(&catalog, Balances::new(10.0, 10.0), &mut board);

        assert!(ledger.spend_and_confirm(UnitType::Destructor, Cell::new(3, 10)));
        assert!((ledger.balance(Pool::Structure) - 7.0).abs() < 1e-9);
        assert!((ledger.balance(Pool::Mobile) - 10.0).abs() < 1e-9);

        assert!(ledger.spend_and_confirm(UnitType::Emp, Cell::new(19, 5)));
        assert!((ledger.balance(Pool::Mobile) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_legality_keeps_balance() {
        let catalog = UnitCatalog::default();
        let mut board = board();
        let mut ledger = ResourceLedger::new(&catalog, Balances::new(5.0, 0.0), &mut board);

        assert!(ledger.spend_and_confirm(UnitType::Filter, Cell::new(3, 11)));
        assert!(!ledger.spend_and_confirm(UnitType::Filter, Cell::new(3, 11)));
        assert!((ledger.balance(Pool::Structure) - 4.0).abs() < 1e-9);
        assert_eq!(ledger.rejections().illegal, 1);
        assert_eq!(ledger.rejections().unaffordable, 0);
    }

    #[test]
    fn test_unaffordable_rejected_before_legality() {
        let catalog = UnitCatalog::default();
        let mut board = board();
        let mut ledger = ResourceLedger::new(&catalog, Balances::new(2.0, 0.0), &mut board);

        assert!(!ledger.can_afford(UnitType::Destructor));
        assert!(!ledger.spend_and_confirm(UnitType::Destructor, Cell::new(0, 0)));
        assert_eq!(ledger.rejections().unaffordable, 1);
        assert_eq!(ledger.rejections().illegal, 0);
    }

    #[test]
    fn test_number_affordable_floors() {
        let catalog = UnitCatalog::default();
        let mut board = board();
        let ledger = ResourceLedger::new(&catalog, Balances::new(0.0, 10.5), &mut board);
        assert_eq!(ledger.number_affordable(UnitType::Emp), 3);
        assert_eq!(ledger.number_affordable(UnitType::Ping), 10);
        assert_eq!(ledger.number_affordable(UnitType::Filter), 0);
    }
}
