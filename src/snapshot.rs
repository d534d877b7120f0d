//! Per-turn input delivered by the game engine.
//!
//! A [`TurnSnapshot`] is created fresh for every decision turn and is never
//! mutated by the engine core. [`ActionFrame`]s arrive between decision turns
//! and carry the breaches observed while the engine resolved combat.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::Cell;
use crate::units::{Pool, UnitCatalog, UnitType};

/// Largest resource balance a snapshot may carry.
pub const MAX_BALANCE: f64 = 1.0e6;

/// Which side owns a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// The acting side.
    Me,
    /// The opponent.
    Opponent,
}

/// A live structure on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Resolved unit type.
    pub unit_type: UnitType,
    /// Owning side.
    pub owner: Owner,
    /// Position on the board.
    pub cell: Cell,
    /// Current integrity.
    pub integrity: f64,
}

impl Unit {
    /// Create a new unit.
    #[must_use]
    pub const fn new(unit_type: UnitType, owner: Owner, cell: Cell, integrity: f64) -> Self {
        Self {
            unit_type,
            owner,
            cell,
            integrity,
        }
    }
}

/// Balances of the two resource pools available to the acting side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Balances {
    /// Points spendable on structures.
    pub structure_points: f64,
    /// Points spendable on mobile units.
    pub mobile_points: f64,
}

impl Balances {
    /// Create balances for both pools.
    #[must_use]
    pub const fn new(structure_points: f64, mobile_points: f64) -> Self {
        Self {
            structure_points,
            mobile_points,
        }
    }

    /// Balance of one pool.
    #[must_use]
    pub const fn get(&self, pool: Pool) -> f64 {
        match pool {
            Pool::Structure => self.structure_points,
            Pool::Mobile => self.mobile_points,
        }
    }

    /// Deduct an amount from one pool.
    pub fn spend(&mut self, pool: Pool, amount: f64) {
        match pool {
            Pool::Structure => self.structure_points -= amount,
            Pool::Mobile => self.mobile_points -= amount,
        }
    }
}

/// Read-only view of the board for one decision turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSnapshot {
    /// Turn number, increasing by one every decision turn.
    pub turn: u32,
    /// All live structures of both sides.
    pub structures: Vec<Unit>,
    /// The acting side's resource balances.
    pub balances: Balances,
}

impl TurnSnapshot {
    /// Create a snapshot of an empty board.
    #[must_use]
    pub fn new(turn: u32, balances: Balances) -> Self {
        Self {
            turn,
            structures: Vec::new(),
            balances,
        }
    }

    /// Add a structure, builder style.
    #[must_use]
    pub fn with_structure(mut self, unit: Unit) -> Self {
        self.structures.push(unit);
        self
    }

    /// Get the structure standing on a cell, if any.
    #[must_use]
    pub fn structure_at(&self, cell: Cell) -> Option<&Unit> {
        self.structures.iter().find(|unit| unit.cell == cell)
    }

    /// Resolve a wire snapshot against the unit catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUnitType`] for shorthands missing from the
    /// catalog, [`EngineError::NotAStructure`] for mobile units in the
    /// structure list, and [`EngineError::InvalidSnapshot`] for negative or
    /// non-finite numbers and for balances above [`MAX_BALANCE`].
    pub fn from_wire(wire: WireSnapshot, catalog: &UnitCatalog) -> Result<Self> {
        for (name, value) in [
            ("structure_points", wire.structure_points),
            ("mobile_points", wire.mobile_points),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidSnapshot(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
            if value > MAX_BALANCE {
                return Err(EngineError::InvalidSnapshot(format!(
                    "{name} ({value}) exceeds {MAX_BALANCE}"
                )));
            }
        }

        let structures = wire
            .structures
            .into_iter()
            .map(|raw| {
                let unit_type = catalog.resolve(&raw.unit)?;
                if !unit_type.is_structure() {
                    return Err(EngineError::NotAStructure(unit_type));
                }
                if !raw.integrity.is_finite() || raw.integrity < 0.0 {
                    return Err(EngineError::InvalidSnapshot(format!(
                        "{} at {} has integrity {}",
                        raw.unit, raw.at, raw.integrity
                    )));
                }
                Ok(Unit::new(unit_type, raw.owner, raw.at, raw.integrity))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            turn: wire.turn,
            structures,
            balances: Balances::new(wire.structure_points, wire.mobile_points),
        })
    }

    /// Parse and resolve a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for malformed JSON, otherwise the errors
    /// of [`TurnSnapshot::from_wire`].
    pub fn from_json(json: &str, catalog: &UnitCatalog) -> Result<Self> {
        let wire: WireSnapshot = serde_json::from_str(json)?;
        Self::from_wire(wire, catalog)
    }
}

/// A snapshot as the engine sends it, with unit types as shorthands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSnapshot {
    /// Turn number.
    pub turn: u32,
    /// All live structures of both sides.
    #[serde(default)]
    pub structures: Vec<WireUnit>,
    /// Structure-point balance.
    pub structure_points: f64,
    /// Mobile-unit-point balance.
    pub mobile_points: f64,
}

/// A structure as the engine sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireUnit {
    /// Unit shorthand, e.g. `"DF"`.
    pub unit: String,
    /// Owning side.
    pub owner: Owner,
    /// Position on the board.
    pub at: Cell,
    /// Current integrity.
    pub integrity: f64,
}

/// Sub-turn combat events reported between two decision turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFrame {
    /// Cells where a mobile unit broke through during this frame.
    #[serde(default)]
    pub breaches: Vec<Cell>,
}
