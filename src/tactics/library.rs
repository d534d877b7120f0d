//! The tactic library.
//!
//! Candidate cells are fixed at definition time for the standard 28×28
//! arena; their order is the placement priority. Offensive bursts size their
//! candidate list from the mobile balance when they run.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::grid::Cell;
use crate::ledger::{PlacementOracle, ResourceLedger};
use crate::tactics::executor::{PlacementPlan, place_greedy};
use crate::units::UnitType;

/// Row of the front wall.
pub const WALL_ROW: u16 = 11;

/// Row of the reinforcement turrets, directly behind the wall.
pub const REINFORCE_ROW: u16 = 10;

/// Columns `WALL_START..WALL_END` are covered by the wall rows.
const WALL_START: u16 = 3;
const WALL_END: u16 = 25;

/// Columns left open in the wall rows so own units can path through.
const WALL_GAP: [u16; 2] = [13, 14];

const CORNER_FILTERS: [Cell; 6] = [
    Cell::new(0, 13),
    Cell::new(27, 13),
    Cell::new(1, 13),
    Cell::new(2, 12),
    Cell::new(25, 12),
    Cell::new(26, 13),
];

const CORNER_DESTRUCTORS: [Cell; 4] = [
    Cell::new(1, 12),
    Cell::new(2, 11),
    Cell::new(25, 11),
    Cell::new(26, 12),
];

const SUPPORT_CLUSTER: [Cell; 6] = [
    Cell::new(12, 10),
    Cell::new(15, 10),
    Cell::new(12, 9),
    Cell::new(15, 9),
    Cell::new(12, 8),
    Cell::new(15, 8),
];

/// Launch cells the heavy burst alternates between.
const HEAVY_LAUNCH: [Cell; 2] = [Cell::new(8, 5), Cell::new(19, 5)];

const SWARM_LAUNCH_LEFT: Cell = Cell::new(11, 2);
const SWARM_LAUNCH_RIGHT: Cell = Cell::new(16, 2);

/// Corners left of this column belong to the left flank.
const FLANK_SPLIT: u16 = 14;

/// Column filter for the wall rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnParity {
    /// Even x coordinates.
    Even,
    /// Odd x coordinates.
    Odd,
}

impl ColumnParity {
    /// Check if a column has this parity.
    #[must_use]
    pub const fn matches(self, x: u16) -> bool {
        match self {
            ColumnParity::Even => x % 2 == 0,
            ColumnParity::Odd => x % 2 == 1,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            ColumnParity::Even => "even",
            ColumnParity::Odd => "odd",
        }
    }
}

/// Left or right half of the corner set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flank {
    /// Corners on the left board edge.
    Left,
    /// Corners on the right board edge.
    Right,
}

impl Flank {
    const fn contains(self, cell: Cell) -> bool {
        match self {
            Flank::Left => cell.x < FLANK_SPLIT,
            Flank::Right => cell.x >= FLANK_SPLIT,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Flank::Left => "left",
            Flank::Right => "right",
        }
    }
}

/// Launch lane of the swarm burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Launch from the left deployment edge.
    #[default]
    Left,
    /// Launch from the right deployment edge.
    Right,
}

impl Lane {
    /// The swarm launch cell of this lane.
    #[must_use]
    pub const fn launch_cell(self) -> Cell {
        match self {
            Lane::Left => SWARM_LAUNCH_LEFT,
            Lane::Right => SWARM_LAUNCH_RIGHT,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Right => "right",
        }
    }
}

/// A named placement tactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tactic {
    /// Filters then destructors at the board corners, optionally one flank.
    ProtectCorners(Option<Flank>),
    /// Filters along the front wall row.
    BuildWall(Option<ColumnParity>),
    /// Destructors directly behind the front wall.
    ReinforceWall(Option<ColumnParity>),
    /// Encryptors in a small central cluster behind the front line.
    BoostAttackers,
    /// All mobile points on EMPs, alternating between two launch cells.
    HeavyBurst,
    /// All mobile points on pings from a single lane.
    SwarmBurst(Lane),
}

impl Tactic {
    /// Candidate placements of this tactic against the current balances.
    #[must_use]
    pub fn plans<O: PlacementOracle>(self, ledger: &ResourceLedger<'_, O>) -> Vec<PlacementPlan> {
        match self {
            Tactic::ProtectCorners(flank) => {
                let on_flank = |cell: &Cell| flank.is_none_or(|f| f.contains(*cell));
                vec![
                    PlacementPlan::new(
                        UnitType::Filter,
                        CORNER_FILTERS.iter().copied().filter(on_flank).collect(),
                    ),
                    PlacementPlan::new(
                        UnitType::Destructor,
                        CORNER_DESTRUCTORS.iter().copied().filter(on_flank).collect(),
                    ),
                ]
            }
            Tactic::BuildWall(parity) => {
                vec![PlacementPlan::new(UnitType::Filter, wall_row(WALL_ROW, parity))]
            }
            Tactic::ReinforceWall(parity) => vec![PlacementPlan::new(
                UnitType::Destructor,
                wall_row(REINFORCE_ROW, parity),
            )],
            Tactic::BoostAttackers => {
                vec![PlacementPlan::new(UnitType::Encryptor, SUPPORT_CLUSTER.to_vec())]
            }
            Tactic::HeavyBurst => {
                let count = ledger.number_affordable(UnitType::Emp) as usize;
                let cells = (0..count).map(|i| HEAVY_LAUNCH[i % 2]).collect();
                vec![PlacementPlan::new(UnitType::Emp, cells)]
            }
            Tactic::SwarmBurst(lane) => {
                let count = ledger.number_affordable(UnitType::Ping) as usize;
                vec![PlacementPlan::new(
                    UnitType::Ping,
                    vec![lane.launch_cell(); count],
                )]
            }
        }
    }

    /// Run every plan of this tactic through the placement executor.
    pub fn execute<O: PlacementOracle>(self, ledger: &mut ResourceLedger<'_, O>) -> TacticOutcome {
        let mut outcome = TacticOutcome {
            tactic: self,
            attempted: 0,
            placed: 0,
        };
        for plan in self.plans(ledger) {
            outcome.attempted += plan.cells.len();
            outcome.placed += place_greedy(ledger, plan.unit, &plan.cells);
        }
        debug!(
            tactic = %self,
            attempted = outcome.attempted,
            placed = outcome.placed,
            "tactic finished"
        );
        outcome
    }
}

/// Cells of a wall row, left to right, skipping the gap.
fn wall_row(y: u16, parity: Option<ColumnParity>) -> Vec<Cell> {
    (WALL_START..WALL_END)
        .filter(|x| !WALL_GAP.contains(x))
        .filter(|&x| parity.is_none_or(|p| p.matches(x)))
        .map(|x| Cell::new(x, y))
        .collect()
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tactic::ProtectCorners(None) => f.write_str("protect_corners"),
            Tactic::ProtectCorners(Some(flank)) => write!(f, "protect_corners({})", flank.name()),
            Tactic::BuildWall(None) => f.write_str("build_wall"),
            Tactic::BuildWall(Some(parity)) => write!(f, "build_wall({})", parity.name()),
            Tactic::ReinforceWall(None) => f.write_str("reinforce_wall"),
            Tactic::ReinforceWall(Some(parity)) => {
                write!(f, "reinforce_wall({})", parity.name())
            }
            Tactic::BoostAttackers => f.write_str("boost_attackers"),
            Tactic::HeavyBurst => f.write_str("heavy_burst"),
            Tactic::SwarmBurst(lane) => write!(f, "swarm_burst({})", lane.name()),
        }
    }
}

impl Serialize for Tactic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of running one tactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TacticOutcome {
    /// The tactic that ran.
    pub tactic: Tactic,
    /// Number of candidate cells tried.
    pub attempted: usize,
    /// Number of units placed.
    pub placed: usize,
}

impl TacticOutcome {
    /// Number of candidates turned down.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.attempted - self.placed
    }
}
